//! Issue a development access token for a member.
//!
//! Usage: `JWT_PRIVATE_KEY=<base64 pem> cargo run --example issue_token -- <user-id> [expiry-seconds]`

use uuid::Uuid;
use velvet_server::auth::jwt;

fn main() {
    let mut args = std::env::args().skip(1);
    let user_id: Uuid = args
        .next()
        .expect("Usage: issue_token <user-id> [expiry-seconds]")
        .parse()
        .expect("User ID must be a UUID");
    let expiry: i64 = args.next().map_or(900, |s| s.parse().expect("Expiry must be an integer"));

    dotenvy::dotenv().ok();
    let private_key = std::env::var("JWT_PRIVATE_KEY").expect("JWT_PRIVATE_KEY must be set");

    let token =
        jwt::generate_access_token(user_id, &private_key, expiry).expect("Failed to sign token");
    println!("{token}");
}
