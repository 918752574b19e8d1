//! User command implementation

use anyhow::{Context, Result};
use clap::Subcommand;

use ecoquest::config::Config;
use ecoquest::server::SESSION_HEADER;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user and print a session token
    Add {
        username: String,
        email: String,
    },

    /// Issue a new session token for an existing user
    Login { username: String },
}

pub fn user_command(config: &Config, command: UserCommands) -> Result<()> {
    let db = super::open_store(config)?;

    let (user, token) = match command {
        UserCommands::Add { username, email } => {
            let user = db.insert_user(&username, &email)?;
            let token = db.create_session(user.id)?;
            println!("Added user {} (#{})", user.username, user.id);
            (user, token)
        }
        UserCommands::Login { username } => {
            let user = db
                .user_by_name(&username)?
                .with_context(|| format!("No such user: {username}"))?;
            let token = db.create_session(user.id)?;
            (user, token)
        }
    };

    println!("Session for {}: {}", user.username, token);
    println!("Send it as the `{}` header.", SESSION_HEADER);
    Ok(())
}
