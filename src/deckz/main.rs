use clap::Parser;
use deckz::api::{
    ConfigAction, ContentAction, DeckzApi, DeckzPaths, OutlineAction, PayloadInput, SlideAction,
    ThemeAction,
};
use deckz::error::{DeckzError, Result};
use deckz::model::Scope;
use deckz::store::fs::FileStore;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};

mod args;
mod print;
mod styles;
use args::{Cli, Commands, ContentCommand, OutlineCommand, SlidesCommand};
use print::{
    print_config, print_deck_header, print_decks, print_instruction, print_messages,
    print_outlines, print_slides, print_themes,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DeckzApi<FileStore>,
    scope: Scope,
    deck: String,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Create { title, theme }) => handle_create(&mut ctx, title, theme),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Delete) => handle_delete(&mut ctx),
        Some(Commands::Outline { action }) => handle_outline(&mut ctx, action),
        Some(Commands::Slides { action }) => handle_slides(&mut ctx, action),
        Some(Commands::Ingest { file }) => handle_ingest(&mut ctx, &file),
        Some(Commands::Content { action }) => handle_content(&mut ctx, action),
        Some(Commands::Show { slide, edit }) => handle_show(&ctx, slide, edit),
        Some(Commands::Theme { name, list }) => handle_theme(&mut ctx, name, list),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(".deckz");
    let global_dir = global_data_dir()?;

    let scope = if cli.global {
        Scope::Global
    } else {
        Scope::Project
    };
    log::debug!(
        "scope {:?}, project store {}, global store {}",
        scope,
        project_dir.display(),
        global_dir.display()
    );

    let store = FileStore::new(Some(project_dir.clone()), global_dir.clone());
    let paths = DeckzPaths {
        project: Some(project_dir),
        global: global_dir,
    };

    Ok(AppContext {
        api: DeckzApi::new(store, paths),
        scope,
        deck: cli.deck.clone(),
    })
}

/// `DECKZ_HOME` overrides the platform data directory.
fn global_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("DECKZ_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "deckz", "deckz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeckzError::Store("Could not determine the global data directory".into()))
}

/// Reads a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init(ctx.scope)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(ctx: &mut AppContext, title: String, theme: Option<String>) -> Result<()> {
    if title.trim().is_empty() {
        return Err(DeckzError::Api("Title cannot be empty".into()));
    }
    let result = ctx.api.create_deck(ctx.scope, title, theme)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_decks(ctx.scope)?;
    print_decks(&result.listed_decks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.delete_deck(ctx.scope, &ctx.deck)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_outline(ctx: &mut AppContext, action: Option<OutlineCommand>) -> Result<()> {
    let action = match action.unwrap_or(OutlineCommand::List) {
        OutlineCommand::List => OutlineAction::List,
        OutlineCommand::Add { title, after } => OutlineAction::Add {
            title: title.unwrap_or_default(),
            after,
        },
        OutlineCommand::Rename { position, title } => OutlineAction::Rename { position, title },
        OutlineCommand::Remove { position } => OutlineAction::Remove { position },
        OutlineCommand::Move { from, to } => OutlineAction::Move { from, to },
        OutlineCommand::Import { file, replace } => OutlineAction::Import {
            raw: read_input(&file)?,
            replace,
        },
        OutlineCommand::Reset => OutlineAction::Reset,
    };

    let result = ctx.api.outline(ctx.scope, &ctx.deck, action)?;
    print_messages(&result.messages);
    if let Some(dd) = &result.deck {
        print_deck_header(dd);
        print_outlines(&dd.deck.state);
    }
    Ok(())
}

fn handle_slides(ctx: &mut AppContext, action: Option<SlidesCommand>) -> Result<()> {
    let action = match action.unwrap_or(SlidesCommand::List) {
        SlidesCommand::List => SlideAction::List,
        SlidesCommand::Move { from, to } => SlideAction::Move { from, to },
        SlidesCommand::Remove { position } => SlideAction::Remove { position },
        SlidesCommand::Select { position } => SlideAction::Select { position },
        SlidesCommand::Insert { file, at } => SlideAction::Insert {
            raw: read_input(&file)?,
            position: at,
        },
    };

    let result = ctx.api.slides(ctx.scope, &ctx.deck, action)?;
    print_messages(&result.messages);
    if let Some(dd) = &result.deck {
        print_deck_header(dd);
        print_slides(&dd.deck.state);
    }
    Ok(())
}

fn handle_ingest(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let raw = read_input(file)?;
    let result = ctx.api.ingest(ctx.scope, &ctx.deck, &raw)?;
    print_messages(&result.messages);
    if let Some(dd) = &result.deck {
        print_slides(&dd.deck.state);
    }
    Ok(())
}

fn handle_content(ctx: &mut AppContext, action: ContentCommand) -> Result<()> {
    let action = match action {
        ContentCommand::Set {
            slide,
            node,
            values,
            json,
        } => {
            let payload = if json {
                PayloadInput::Json(values.join(" "))
            } else {
                PayloadInput::Values(values)
            };
            ContentAction::Set {
                slide,
                node_id: node,
                payload,
            }
        }
        ContentCommand::Insert {
            slide,
            container,
            kind,
            index,
            text,
        } => ContentAction::Insert {
            slide,
            container_id: container,
            index,
            kind,
            text,
        },
        ContentCommand::Remove { slide, node } => ContentAction::Remove {
            slide,
            node_id: node,
        },
    };

    let result = ctx.api.content(ctx.scope, &ctx.deck, action)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, slide: Option<usize>, edit: bool) -> Result<()> {
    let result = ctx.api.show(ctx.scope, &ctx.deck, slide, edit)?;
    if let Some(rendered) = &result.rendered {
        print_instruction(rendered);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, name: Option<String>, list: bool) -> Result<()> {
    let action = match (name, list) {
        (_, true) => ThemeAction::List,
        (Some(name), false) => ThemeAction::Set(name),
        (None, false) => ThemeAction::Show,
    };
    let result = ctx.api.theme(ctx.scope, &ctx.deck, action)?;
    print_messages(&result.messages);
    print_themes(&result.themes);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(ctx.scope, action)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
