//! User CLI commands
//!
//! Registration, login and logout. Passwords are read from the terminal
//! without echo unless supplied through `--password` or `EVENTSX_PASSWORD`.

use clap::Subcommand;
use zeroize::Zeroizing;

use crate::error::{EventsxError, EventsxResult};
use crate::models::Role;
use crate::services::UserService;
use crate::storage::{KeyValueStore, Storage};
use crate::validation::RegistrationForm;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Home governorate (e.g. "Cairo", "Port Said")
        #[arg(short, long, default_value = "")]
        governorate: String,
        /// Accept the Terms and Privacy Policy
        #[arg(long)]
        accept_terms: bool,
        /// Create an admin account
        #[arg(long)]
        admin: bool,
        /// Password (prompted for when omitted)
        #[arg(long, env = "EVENTSX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in
    Login {
        /// Email address
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "EVENTSX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out
    Logout,
    /// Show who is logged in
    Whoami,
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    store: &dyn KeyValueStore,
    cmd: UserCommands,
) -> EventsxResult<()> {
    let service = UserService::new(storage, store);

    match cmd {
        UserCommands::Register {
            name,
            email,
            governorate,
            accept_terms,
            admin,
            password,
        } => {
            let password = match password {
                Some(p) => Zeroizing::new(p),
                None => prompt_new_password()?,
            };

            let form = RegistrationForm {
                name,
                email,
                password,
                governorate,
                accept_terms,
            };
            let role = if admin { Role::Admin } else { Role::Student };

            let user = service.register(&form, role)?;
            println!("Registered {} ({})", user.name, user.email);
            if user.is_admin() {
                println!("Role: admin");
            }
            println!("Run 'eventsx user login {}' to log in.", user.email);
        }

        UserCommands::Login { email, password } => {
            let password = match password {
                Some(p) => Zeroizing::new(p),
                None => prompt_password("Password: ")?,
            };

            let session = service.login(&email, &password)?;
            println!("Logged in as {} ({})", session.name, session.role);
        }

        UserCommands::Logout => match service.logout()? {
            Some(session) => println!("Logged out {}.", session.email),
            None => println!("Nobody is logged in."),
        },

        UserCommands::Whoami => match service.current()? {
            Some(session) => {
                println!("{} <{}>", session.name, session.email);
                println!("Role: {}", session.role);
                println!("ID:   {}", session.id);
            }
            None => println!("Not logged in."),
        },
    }

    Ok(())
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> EventsxResult<Zeroizing<String>> {
    let first = prompt_password("Password: ")?;
    let second = prompt_password("Confirm password: ")?;

    if *first != *second {
        return Err(EventsxError::Validation("Passwords do not match".into()));
    }

    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> EventsxResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| EventsxError::Io(format!("Failed to read password: {}", e)))
}
