//! Login and account-recovery command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use dryclean_client::types::{ProfileImage, RegisterRequest};
use dryclean_client::{ApiClient, SessionStore};
use dryclean_core::format::format_phone_number;

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "DRYCLEAN_PASSWORD")]
        password: String,
        /// Optional profile picture (PNG or JPEG)
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Request a password-reset code
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Verify a one-time code
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Send a new one-time code
    ResendOtp {
        #[arg(long)]
        email: String,
    },
}

pub(crate) async fn run_login(
    client: &ApiClient,
    session: &mut SessionStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let login = client.login(email, password).await?;
    session.store_login(&login);
    session.save()?;
    if login.message.is_empty() {
        println!("logged in as {}", login.user_id);
    } else {
        println!("{}", login.message);
    }
    Ok(())
}

pub(crate) fn run_whoami(session: &SessionStore) {
    match session.credentials() {
        Some(creds) => println!(
            "user {} ({})",
            creds.user_id,
            creds.role.as_deref().unwrap_or("no role")
        ),
        None => println!("not logged in"),
    }
}

fn image_mime(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub(crate) async fn run_auth_command(
    client: &ApiClient,
    command: AuthCommands,
) -> anyhow::Result<()> {
    let message = match command {
        AuthCommands::Register {
            name,
            email,
            phone,
            password,
            image,
        } => {
            let profile_image = match image {
                Some(path) => Some(ProfileImage {
                    file_name: path
                        .file_name()
                        .map_or_else(|| "profile".to_string(), |n| n.to_string_lossy().into_owned()),
                    mime_type: image_mime(&path).to_string(),
                    bytes: std::fs::read(&path)?,
                }),
                None => None,
            };
            client
                .register(RegisterRequest {
                    name,
                    email,
                    phone: format_phone_number(&phone),
                    password,
                    profile_image,
                })
                .await?
                .message
        }
        AuthCommands::ForgotPassword { email } => client.forgot_password(&email).await?.message,
        AuthCommands::VerifyOtp { email, otp } => client.verify_otp(&email, &otp).await?.message,
        AuthCommands::ResendOtp { email } => client.resend_otp(&email).await?.message,
    };
    println!("{message}");
    Ok(())
}
