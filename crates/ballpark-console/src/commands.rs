//! Subcommand handlers

use crate::cli::{
    CommentsCommand, Commands, CommunityCommand, InquiriesCommand, ListArgs, UsersCommand,
};
use crate::dialog::{Dialog, TerminalDialog};
use crate::error::Result;
use crate::screens::{
    CommentsScreen, CommunityScreen, InquiriesScreen, Outcome, Screen, UsersScreen,
};
use crate::state::AppState;
use ballpark_core::Config;
use tracing::info;

/// Run a subcommand against the configured backend
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot be
/// built, or a command line value is rejected.
pub async fn run(command: Commands, config: Config) -> Result<Outcome> {
    if let Commands::Config { show, validate } = command {
        return config_command(&config, show, validate);
    }
    let mut dialog = TerminalDialog::new(config.console.assume_yes);
    let app = AppState::connect(config)?;
    execute(command, app, &mut dialog).await
}

/// Run a subcommand against any backend and dialog
///
/// # Errors
///
/// Returns an error if a command line value is rejected.
pub async fn execute(command: Commands, app: AppState, dialog: &mut dyn Dialog) -> Result<Outcome> {
    match command {
        Commands::Users { action } => users(action, app, dialog).await,
        Commands::Comments { action } => comments(action, app, dialog).await,
        Commands::Community { action } => community(action, app, dialog).await,
        Commands::Inquiries { action } => inquiries(action, app, dialog).await,
        Commands::Config { show, validate } => config_command(app.config(), show, validate),
    }
}

/// Load a screen, apply search and paging, and print the page
async fn list<S: Screen>(screen: &mut S, args: &ListArgs) -> Result<Outcome> {
    let loaded = screen.load().await;
    if loaded {
        if let Some(page_size) = args.page_size {
            screen.set_page_size(page_size)?;
        }
        if args.search.is_some() || args.by.is_some() {
            screen.search(args.search.as_deref().unwrap_or_default(), args.by.as_deref());
        }
        screen.go_to_page(args.page);
    }
    print!("{}", screen.render());
    Ok(if loaded { Outcome::Done } else { Outcome::Failed })
}

async fn users(action: UsersCommand, app: AppState, dialog: &mut dyn Dialog) -> Result<Outcome> {
    let mut screen = UsersScreen::new(app)?;
    match action {
        UsersCommand::List(args) => list(&mut screen, &args).await,
        UsersCommand::Show { number } => {
            if !screen.load().await {
                print!("{}", screen.render());
                return Ok(Outcome::Failed);
            }
            let outcome = screen.open_detail(number, dialog);
            if let Some(modal) = screen.modal() {
                print!("{}", modal.render());
            }
            Ok(outcome)
        }
        UsersCommand::Suspend { number } => {
            screen.load().await;
            Ok(screen.toggle_suspension(number, dialog).await)
        }
        UsersCommand::Release { number } => {
            screen.load().await;
            Ok(screen.release(number, dialog).await)
        }
    }
}

async fn comments(action: CommentsCommand, app: AppState, dialog: &mut dyn Dialog) -> Result<Outcome> {
    let mut screen = CommentsScreen::new(app)?;
    match action {
        CommentsCommand::List(args) => list(&mut screen, &args).await,
        CommentsCommand::Show { key } => {
            if !screen.load().await {
                print!("{}", screen.render());
                return Ok(Outcome::Failed);
            }
            let outcome = screen.open_detail(key, dialog);
            if let Some(modal) = screen.modal() {
                print!("{}", modal.render());
            }
            Ok(outcome)
        }
        CommentsCommand::Delete { key } => Ok(screen.delete(key, dialog).await),
        CommentsCommand::DeleteMany { keys } => {
            screen.load().await;
            screen.select_rows(keys);
            Ok(screen.delete_selected(dialog).await)
        }
    }
}

async fn community(action: CommunityCommand, app: AppState, dialog: &mut dyn Dialog) -> Result<Outcome> {
    let mut screen = CommunityScreen::new(app)?;
    match action {
        CommunityCommand::List(args) => list(&mut screen, &args).await,
        CommunityCommand::Show { id } => {
            let outcome = screen.open_detail(id, dialog).await;
            if let Some(modal) = screen.modal() {
                print!("{}", modal.render());
            }
            Ok(outcome)
        }
        CommunityCommand::Delete { id } => Ok(screen.delete(id, dialog).await),
        CommunityCommand::DeleteMany { ids } => {
            screen.load().await;
            screen.select_rows(ids);
            Ok(screen.delete_selected(dialog).await)
        }
    }
}

async fn inquiries(action: InquiriesCommand, app: AppState, dialog: &mut dyn Dialog) -> Result<Outcome> {
    let mut screen = InquiriesScreen::new(app)?;
    match action {
        InquiriesCommand::List(args) => list(&mut screen, &args).await,
        InquiriesCommand::Show { id } => {
            let outcome = screen.open_detail(id, dialog).await;
            if let Some(modal) = screen.modal() {
                print!("{}", modal.render());
            }
            Ok(outcome)
        }
        InquiriesCommand::Delete { id } => Ok(screen.delete(id, dialog).await),
        InquiriesCommand::DeleteMany { ids } => {
            screen.load().await;
            screen.select_rows(ids);
            Ok(screen.delete_selected(dialog).await)
        }
        InquiriesCommand::Answer { id, text } => {
            screen.load().await;
            let opened = screen.open_detail(id, dialog).await;
            if !opened.is_done() {
                return Ok(opened);
            }
            screen.set_answer(text);
            Ok(screen.submit_answer(dialog).await)
        }
    }
}

/// Validate and/or print the resolved configuration
///
/// Prints the configuration when neither flag is given.
///
/// # Errors
///
/// Returns an error if validation fails or the configuration cannot be
/// serialized.
pub fn config_command(config: &Config, show: bool, validate: bool) -> Result<Outcome> {
    if validate {
        info!("Validating configuration...");
        config.check()?;
        println!("Configuration is valid.");
    }

    if show || !validate {
        let rendered = toml::to_string_pretty(config).map_err(|e| {
            ballpark_core::Error::configuration(format!("Failed to serialize configuration: {e}"))
        })?;
        println!("{rendered}");
    }

    Ok(Outcome::Done)
}
