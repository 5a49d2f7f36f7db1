use crate::{conf::settings, prelude::Result, token::create_token};

pub fn issue(username: &str, admin: bool) -> Result<()> {
    let token = create_token(username, admin, &settings.secret_key)?;
    tracing::debug!("issued token for {} (admin: {})", username, admin);
    println!("{token}");
    Ok(())
}
