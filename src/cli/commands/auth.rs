use anyhow::Context;
use clap::Args;
use uuid::Uuid;

use crate::auth::JwtAuth;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "User id the token identifies")]
    pub user_id: Uuid,

    #[arg(long, help = "Override the configured expiry, in hours")]
    pub expiry_hours: Option<u64>,
}

/// Print a signed token for `user_id` to stdout
pub fn token(args: TokenArgs, config: &AppConfig) -> anyhow::Result<()> {
    let expiry_hours = args.expiry_hours.unwrap_or(config.security.jwt_expiry_hours);
    let auth = JwtAuth::new(&config.security.jwt_secret, expiry_hours)
        .context("cannot sign tokens with the configured secret")?;

    let token = auth.generate_jwt(args.user_id)?;
    println!("{}", token);
    Ok(())
}
