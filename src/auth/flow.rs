//! Interactive auth commands: login, register, logout, status

use anyhow::{bail, Context, Result};

use super::guard::LoginRedirect;
use super::tokens::ClaimExpiry;
use crate::api;
use crate::app::App;
use crate::models::Registration;

/// Destination carried by a login location such as `/login?redirect=%2Fwallet`.
fn resume_destination(location: &str) -> Option<String> {
    LoginRedirect::from_location(location)
        .return_path()
        .map(String::from)
}

fn print_resume(redirect: Option<&str>) {
    if let Some(dest) = redirect.and_then(resume_destination) {
        println!("Continue at {}", dest);
    }
}

/// Exchange credentials for a session and persist it. `redirect` is the
/// login location a blocked command printed; its destination is echoed
/// back once signed in.
pub async fn login(
    app: &App,
    email: &str,
    password: &str,
    force: bool,
    redirect: Option<&str>,
) -> Result<()> {
    if !force && app.session.is_authenticated() {
        println!("Already logged in. Use --force to log in again.");
        print_resume(redirect);
        return Ok(());
    }

    tracing::info!("Logging in as {}...", email);
    let resp = api::auth::login(&app.client, email, password)
        .await
        .context("Login request failed")?;
    if !resp.success {
        bail!("Login failed: {}", resp.message);
    }
    let issued = resp.into_data().context("Login response missing tokens")?;

    app.session
        .store_session(
            issued.access_token,
            app.session.hours_valid(),
            issued.refresh_token,
        )
        .context("Failed to save session")?;

    if app.session.is_expired() {
        // Server handed back a token that is already past its exp claim
        app.session.clear_session().ok();
        bail!("Login returned an expired token; check the system clock.");
    }

    println!("Login successful.");
    print_resume(redirect);
    Ok(())
}

pub async fn register(app: &App, registration: &Registration) -> Result<()> {
    let resp = api::auth::register(&app.client, registration).await?;
    if !resp.success {
        bail!("Registration failed: {}", resp.message);
    }
    if resp.message.is_empty() {
        println!("Account created. Run 'market-cli login' to sign in.");
    } else {
        println!("{}", resp.message);
    }
    Ok(())
}

/// Log out locally regardless of what the server says.
pub async fn logout(app: &App) -> Result<()> {
    let outcome = app.session.logout().await;
    if let Some(e) = &outcome.remote_error {
        eprintln!("Warning: server logout failed ({}); local session cleared.", e);
    }
    println!("Logged out.");
    println!(
        "Sign in again at {}",
        outcome.redirect.location(&app.config.login_path)
    );
    Ok(())
}

/// Display current session status without modifying it.
pub async fn status(app: &App) -> Result<()> {
    let Some(status) = app.session.status() else {
        println!("Session:     none");
        println!("\nRun 'market-cli login' to authenticate.");
        return Ok(());
    };

    let record = status.record;
    if status.expired {
        println!("Session:     expired");
    } else {
        println!("Session:     valid");
    }
    println!("  watermark: {}", record.expires_at);
    match record.claim_expiry() {
        ClaimExpiry::At(exp) => println!("  token exp: {}", exp),
        ClaimExpiry::Absent => println!("  token exp: (no claim)"),
        ClaimExpiry::Unreadable => println!("  token exp: (unreadable)"),
    }
    match record.refresh_token {
        Some(_) => println!("Refresh tok: present"),
        None => println!("Refresh tok: none"),
    }
    println!("API:         {}", app.client.base_url());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_destination_from_blocked_command() {
        let location = LoginRedirect::returning_to("/checkout").location("/login");
        assert_eq!(resume_destination(&location).as_deref(), Some("/checkout"));
    }

    #[test]
    fn test_resume_destination_ignores_bare_login() {
        assert_eq!(resume_destination("/login"), None);
        assert_eq!(resume_destination("/login?next=%2Fwallet"), None);
    }
}
