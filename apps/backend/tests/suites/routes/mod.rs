mod health;
mod notes;
mod rate_limiting;
mod search;
