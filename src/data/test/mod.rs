mod client_points;
mod crypto_address;
mod leaderboard_message;
mod middleman;
mod tag;
mod ticket;
mod weekly_quota;
