// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand execution.

use std::sync::Arc;
use std::time::Duration;

use brewbox_api::{
    ApiError, BrewBoxClient, HttpApi, LoginForm, LoginOutcome, OrderAction, OrderForm,
    OrderPoller, OrderScope, PollerExit, PollerHandle, RegistrationForm, TipInput,
};
use brewbox_domain::{Order, OrderId};
use brewbox_persistence::SessionStore;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::Commands;
use crate::config::{Config, ConfigError, GlobalArgs};
use crate::output::{TerminalNotifier, format_order, format_orders};

/// Failure of a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CliError {
    /// Returns true if the server ended the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

/// Runs one subcommand.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the operation fails.
pub async fn run(global: &GlobalArgs, command: Commands) -> Result<(), CliError> {
    let config: Config = Config::from_args(global)?;
    debug!(?config, "Resolved configuration");
    let client: BrewBoxClient = connect(&config)?;

    match command {
        Commands::Register {
            email,
            password,
            confirm_password,
            role,
            display_name,
        } => {
            let form: RegistrationForm = RegistrationForm {
                email,
                password,
                confirm_password,
                role,
                display_name,
            };
            client.register(&form).await?;
            println!("Account created. Log in with `brewbox login`.");
        }
        Commands::Login { email, password } => {
            let outcome: LoginOutcome = client.login(&LoginForm { email, password }).await?;
            report_login(&outcome);
        }
        Commands::Mfa { provider, token } => {
            let outcome: LoginOutcome = client.verify_mfa(provider, &token).await?;
            report_login(&outcome);
        }
        Commands::Logout => {
            client.logout().await?;
            println!("Logged out.");
        }
        Commands::Whoami => match client.session() {
            Ok(session) => println!("Logged in ({}).", session.roles),
            Err(ApiError::Unauthorized) => println!("Not logged in."),
            Err(e) => return Err(e.into()),
        },
        Commands::Orders { scope } => {
            let scope: OrderScope = match scope {
                Some(scope) => scope,
                None => client.visible_scope()?,
            };
            let orders: Vec<Order> = client.list_orders(scope).await?;
            println!(
                "{}",
                format_orders(
                    orders
                        .iter()
                        .map(|order| (order, client.capabilities(order).ok()))
                )
            );
        }
        Commands::Show { id } => {
            let order: Order = client.get_order(&OrderId::new(id)).await?;
            let capabilities = client.capabilities(&order).ok();
            println!("{}", format_order(&order, capabilities.as_ref()));
        }
        Commands::Create {
            pickup_time,
            drinks,
            tip,
            tip_percent,
        } => {
            let tip: TipInput = match (tip, tip_percent) {
                (Some(amount), _) => TipInput::Amount(amount),
                (None, Some(percent)) => TipInput::Percent(percent),
                (None, None) => TipInput::None,
            };
            let form: OrderForm = OrderForm {
                pickup_time,
                drinks,
                tip,
            };
            let order: Order = client.create_order(&form, OffsetDateTime::now_utc()).await?;
            println!("Order placed.\n{}", format_order(&order, None));
        }
        Commands::Claim { id } => perform(&client, &id, OrderAction::Claim).await?,
        Commands::Start { id } => perform(&client, &id, OrderAction::Start).await?,
        Commands::Ready { id } => perform(&client, &id, OrderAction::MarkReady).await?,
        Commands::Cancel { id } => perform(&client, &id, OrderAction::Cancel).await?,
        Commands::Collect { id } => perform(&client, &id, OrderAction::Collect).await?,
        Commands::Pay { id } => perform(&client, &id, OrderAction::MarkPaid).await?,
        Commands::Status { id, status, role } => {
            let order: Order = client.transition(&OrderId::new(id), status, role).await?;
            println!("Order {} is now {}.", order.id, order.status);
        }
        Commands::Watch { interval_secs } => {
            let interval: Duration = interval_secs.map_or(config.poll_interval, Duration::from_secs);
            watch(client, interval).await?;
        }
    }
    Ok(())
}

fn connect(config: &Config) -> Result<BrewBoxClient, ApiError> {
    let api: HttpApi = HttpApi::new(config.api_url.clone(), config.http_timeout)?;
    let store: SessionStore = SessionStore::open_file(&config.session_file);
    Ok(BrewBoxClient::new(Arc::new(api), Arc::new(store)))
}

fn report_login(outcome: &LoginOutcome) {
    match outcome {
        LoginOutcome::LoggedIn { roles } => println!("Logged in ({roles})."),
        LoginOutcome::MfaRequired => println!(
            "MFA required. Run `brewbox mfa <google|apple> --token <TOKEN>` to finish logging in."
        ),
    }
}

async fn perform(client: &BrewBoxClient, id: &str, action: OrderAction) -> Result<(), ApiError> {
    let order: Order = client.perform(&OrderId::new(id), action).await?;
    if action == OrderAction::MarkPaid {
        println!("Order {} marked paid.", order.id);
    } else {
        println!("Order {} is now {}.", order.id, order.status);
    }
    Ok(())
}

/// Polls until Ctrl-C or until the session ends.
async fn watch(client: BrewBoxClient, interval: Duration) -> Result<(), ApiError> {
    client.session()?;
    println!(
        "Watching orders every {}s. Press Ctrl-C to stop.",
        interval.as_secs()
    );

    let handle: PollerHandle = OrderPoller::new(client, Arc::new(TerminalNotifier))
        .with_interval(interval)
        .spawn();

    // Dropping the join future drops the handle, which stops the poller.
    tokio::select! {
        exit = handle.join() => match exit {
            PollerExit::Stopped => Ok(()),
            PollerExit::SessionEnded(e) => Err(e),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            println!("Stopped watching orders.");
            Ok(())
        }
    }
}
