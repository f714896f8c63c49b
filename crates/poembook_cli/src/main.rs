//! Terminal front end for a poem site.
//!
//! # Responsibility
//! - Load the site's collections, drive the browse controller and print views.
//! - Read and update theme/font preferences.
//! - Surface load failures visibly and exit non-zero.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, Cli, Command, PrefsLocation, ThemeAction};
use log::info;
use poembook_core::db::{open_db, open_db_in_memory, Connection};
use poembook_core::render::{detail_view, poet_cards, tag_controls};
use poembook_core::{
    aggregate_tags, find_poem, find_poet, init_logging, load_catalog, BrowseCommand,
    BrowseController, CollectionPaths, PreferenceService, RenderSink, SqlitePreferenceRepository,
    TextRenderer,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let config = AppConfig::from_cli(&cli, &cwd)?;

    if let Some((level, dir)) = &config.logging {
        let dir = dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(level, dir)?;
    }

    match cli.command {
        Command::List {
            tag,
            query,
            sort,
            select,
            excerpts,
        } => {
            let mut renderer = TextRenderer::new().with_excerpts(excerpts);
            let mut commands = vec![BrowseCommand::SetSort(sort)];
            if tag.is_some() {
                commands.push(BrowseCommand::SetTag(tag));
            }
            if let Some(query) = query {
                commands.push(BrowseCommand::SetQuery(query));
            }
            if let Some(id) = select {
                commands.push(BrowseCommand::Select(id));
            }
            browse(&config, &mut renderer, commands).await?;
            print!("{}", renderer.take_output());
        }
        Command::Show { id } => {
            let catalog = load_catalog(
                config.require_site()?.source()?.as_ref(),
                &CollectionPaths::default(),
            )
            .await?;
            let poem = find_poem(catalog.poems(), &id)
                .with_context(|| format!("poem not found: {}", id.trim()))?;
            let poet = find_poet(catalog.poets(), poem.poet_id.as_ref());
            let mut renderer = TextRenderer::new();
            renderer.render_detail(&detail_view(poem, poet));
            print!("{}", renderer.take_output());
        }
        Command::Tags => {
            let catalog = load_catalog(
                config.require_site()?.source()?.as_ref(),
                &CollectionPaths::default(),
            )
            .await?;
            let counts = aggregate_tags(catalog.poems());
            let mut renderer = TextRenderer::new();
            renderer.render_tags(&tag_controls(&counts, None));
            print!("{}", renderer.take_output());
        }
        Command::Poets => {
            let catalog = load_catalog(
                config.require_site()?.source()?.as_ref(),
                &CollectionPaths::default(),
            )
            .await?;
            let mut renderer = TextRenderer::new();
            renderer.render_poets(&poet_cards(catalog.poets()));
            print!("{}", renderer.take_output());
        }
        Command::Theme {
            action,
            prefers_dark,
        } => {
            let conn = open_prefs(&config.prefs)?;
            let service = PreferenceService::new(SqlitePreferenceRepository::new(&conn));
            let theme = match action {
                None => service.theme(prefers_dark)?,
                Some(ThemeAction::Toggle) => service.toggle_theme(prefers_dark)?,
                Some(ThemeAction::Set { theme }) => {
                    service.set_theme(theme)?;
                    theme
                }
            };
            println!("theme={theme}");
        }
        Command::Font { key } => {
            let conn = open_prefs(&config.prefs)?;
            let service = PreferenceService::new(SqlitePreferenceRepository::new(&conn));
            if let Some(key) = key {
                service.set_font(key)?;
            }
            let font = service.font()?;
            println!("font={font}");
            println!("font_family={}", font.css_stack());
        }
    }

    Ok(())
}

/// Starts a session, applies `commands` and renders the final views once.
///
/// On load failure the renderer's failure text is printed before the error
/// is returned.
async fn browse(
    config: &AppConfig,
    renderer: &mut TextRenderer,
    commands: Vec<BrowseCommand>,
) -> Result<()> {
    let source = config.require_site()?.source()?;
    let started =
        BrowseController::start(source.as_ref(), &CollectionPaths::default(), &mut *renderer)
            .await;
    let mut controller = match started {
        Ok(controller) => controller,
        Err(err) => {
            print!("{}", renderer.take_output());
            return Err(err).context("site could not be loaded");
        }
    };

    for command in commands {
        controller.dispatch(command);
    }
    controller.sink_mut().take_output();
    controller.refresh();

    info!(
        "event=cli_browse module=cli status=ok shown={} selected={}",
        controller.view().len(),
        controller.state().selected_id.is_some()
    );
    Ok(())
}

fn open_prefs(location: &PrefsLocation) -> Result<Connection> {
    let conn = match location {
        PrefsLocation::Memory => open_db_in_memory()?,
        PrefsLocation::File(path) => open_db(path)
            .with_context(|| format!("cannot open preference store `{}`", path.display()))?,
    };
    Ok(conn)
}
