use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::{error, info};

use admin::pages::catalog_editor::CatalogEditor;
use admin::pages::home::HomeView;
use admin::pages::login::LoginPage;
use admin::pages::player_editor::PlayerEditor;
use admin::table::filter_key;
use admin::{
    AdminEntity, AppContext, AuthAction, DeleteFlow, EditorMode, FileStorage, ListController,
    Section, TableState, PAGE_SIZE,
};
use gateway::{Config, Entity, Gateway};
use shared::{
    Deck, Equipment, ImageFile, ImageSelection, LabelDraft, LabelFormChange, Labelled, Player,
    PlayerFormChange, Tournament,
};

#[derive(Parser, Debug)]
#[command(name = "majin-admin")]
#[command(about = "Manage the Majin Players tables from the command line")]
struct Args {
    /// Session file, defaults to MAJIN_STORAGE_PATH from the configuration
    #[arg(long)]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session token
    Login {
        #[arg(long, env = "MAJIN_EMAIL")]
        email: String,
        #[arg(long, env = "MAJIN_PASSWORD")]
        password: String,
    },
    Logout,
    /// One page of a section, optionally filtered
    List {
        section: Section,
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    Get {
        section: Section,
        id: String,
    },
    /// Players take name, surname and email; the other sections a label
    Create {
        section: Section,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Picture to upload; required for players and equipment
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        section: Section,
        id: String,
    },
    /// Figures from the home page
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let config = Config::load().map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let storage_path = args.storage.unwrap_or_else(|| config.storage.path.clone());
    let ctx = AppContext::new(Arc::new(FileStorage::new(storage_path)));
    let gateway = Gateway::from_config(&config).context("Failed to build the Supabase client")?;

    let result = run(args.command, &gateway, &ctx).await;
    print_popups(&ctx);
    result
}

async fn run(command: Command, gateway: &Gateway, ctx: &AppContext) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let mut page = LoginPage { email, password };
            if page.submit(gateway, ctx).await.is_none() {
                bail!("Login failed");
            }
            println!("Logged in");
            Ok(())
        }
        Command::Logout => {
            if let Some(token) = ctx.token() {
                if !gateway.auth.logout(&token).await.is_success() {
                    error!("Server logout failed, dropping the local session anyway");
                }
            }
            ctx.dispatch(AuthAction::Logout);
            println!("Logged out");
            Ok(())
        }
        Command::Stats => {
            let view = HomeView::load(gateway, ctx, Local::now().date_naive())
                .await
                .ok_or_else(|| anyhow!("Unable to load tops"))?;
            println!("Tops recorded: {}", view.total_tops);
            println!("Best decks of {}:", view.year);
            for entry in &view.top_decks {
                println!("  {:<24} {}", entry.deck.label, entry.count);
            }
            println!("Tops per month {}: {:?}", view.year, view.months_current);
            println!("Tops per month {}: {:?}", view.year - 1, view.months_previous);
            Ok(())
        }
        command => {
            require_session(gateway, ctx).await?;
            run_admin(command, gateway, ctx).await
        }
    }
}

async fn require_session(gateway: &Gateway, ctx: &AppContext) -> Result<()> {
    if ctx.check_session(gateway).await {
        Ok(())
    } else {
        bail!("Not logged in, run `majin-admin login` first")
    }
}

async fn run_admin(command: Command, gateway: &Gateway, ctx: &AppContext) -> Result<()> {
    match command {
        Command::List { section, filter, page } => match section {
            Section::Players => list::<Player>(gateway, ctx, &filter, page).await,
            Section::Decks => list::<Deck>(gateway, ctx, &filter, page).await,
            Section::Tournaments => list::<Tournament>(gateway, ctx, &filter, page).await,
            Section::Equipments => list::<Equipment>(gateway, ctx, &filter, page).await,
        },
        Command::Get { section, id } => match section {
            Section::Players => get::<Player>(gateway, &id).await,
            Section::Decks => get::<Deck>(gateway, &id).await,
            Section::Tournaments => get::<Tournament>(gateway, &id).await,
            Section::Equipments => get::<Equipment>(gateway, &id).await,
        },
        Command::Delete { section, id } => match section {
            Section::Players => delete::<Player>(gateway, ctx, &id).await,
            Section::Decks => delete::<Deck>(gateway, ctx, &id).await,
            Section::Tournaments => delete::<Tournament>(gateway, ctx, &id).await,
            Section::Equipments => delete::<Equipment>(gateway, ctx, &id).await,
        },
        Command::Create {
            section,
            label,
            name,
            surname,
            email,
            image,
        } => {
            let image = match image {
                Some(path) => ImageSelection::Selected(read_image(&path)?),
                None => ImageSelection::None,
            };
            match section {
                Section::Players => create_player(gateway, ctx, name, surname, email, image).await,
                Section::Decks => create_labelled::<Deck>(gateway, ctx, label, image).await,
                Section::Tournaments => create_labelled::<Tournament>(gateway, ctx, label, image).await,
                Section::Equipments => create_labelled::<Equipment>(gateway, ctx, label, image).await,
            }
        }
        Command::Login { .. } | Command::Logout | Command::Stats => Ok(()),
    }
}

async fn list<E: AdminEntity>(gateway: &Gateway, ctx: &AppContext, filter: &str, page: i64) -> Result<()> {
    let page = page.max(1);
    let from = (page - 1) * PAGE_SIZE;
    let state = TableState {
        from,
        to: from + PAGE_SIZE - 1,
        page,
        filter: filter.to_string(),
        ..Default::default()
    };
    let query = state.to_query(filter_key::<E>());

    let mut controller = ListController::<E>::new(gateway, ctx.clone(), &query);
    if !controller.fetch().await {
        bail!("Unable to load {}", E::SECTION);
    }

    for row in controller.rows() {
        println!("{:<38} {}", Entity::id(row), row.display_name());
    }
    let state = controller.state();
    println!("Page {} of {} ({} rows)", state.page, state.page_count().max(1), state.total);
    Ok(())
}

async fn get<E: AdminEntity>(gateway: &Gateway, id: &str) -> Result<()> {
    let row = E::api(gateway)
        .get(id)
        .await
        .into_data()
        .ok_or_else(|| anyhow!("No {} row with id {}", E::SECTION, id))?;
    println!("{}", serde_json::to_string_pretty(&row)?);
    if E::HAS_IMAGE {
        println!("Image: {}", gateway.images.public_url(id));
    }
    Ok(())
}

async fn delete<E: AdminEntity>(gateway: &Gateway, ctx: &AppContext, id: &str) -> Result<()> {
    let row = E::api(gateway)
        .get(id)
        .await
        .into_data()
        .ok_or_else(|| anyhow!("No {} row with id {}", E::SECTION, id))?;

    info!("Deleting {} {}", E::SECTION, row.display_name());
    let mut flow = DeleteFlow::<E>::new(gateway.clone(), ctx.clone());
    flow.open(row);
    if flow.confirm().await {
        Ok(())
    } else {
        bail!("Delete of {} {} failed", E::SECTION, id)
    }
}

async fn create_player(
    gateway: &Gateway,
    ctx: &AppContext,
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    image: ImageSelection,
) -> Result<()> {
    let mut editor = PlayerEditor::new(gateway.clone(), ctx.clone(), EditorMode::Create);
    editor.change(PlayerFormChange::Name(name.unwrap_or_default()));
    editor.change(PlayerFormChange::Surname(surname.unwrap_or_default()));
    editor.change(PlayerFormChange::Email(email.unwrap_or_default()));
    editor.change(PlayerFormChange::Image(image));

    match editor.save().await {
        Some(route) => {
            println!("Created, edit at {}", route.path());
            Ok(())
        }
        None => bail!("Player not created: {:?}", editor.errors),
    }
}

async fn create_labelled<E>(
    gateway: &Gateway,
    ctx: &AppContext,
    label: Option<String>,
    image: ImageSelection,
) -> Result<()>
where
    E: AdminEntity + Entity<Draft = LabelDraft> + Labelled,
{
    let mut editor = CatalogEditor::<E>::new(gateway.clone(), ctx.clone(), EditorMode::Create);
    editor.change(LabelFormChange::Label(label.unwrap_or_default()));
    if E::HAS_IMAGE {
        editor.change(LabelFormChange::Image(image));
    }

    match editor.save().await {
        Some(route) => {
            println!("Created, edit at {}", route.path());
            Ok(())
        }
        None => bail!("{} not created: {:?}", E::SECTION, editor.errors),
    }
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid image path {}", path.display()))?;
    Ok(ImageFile::from_path_bytes(name, bytes))
}

fn print_popups(ctx: &AppContext) {
    for toast in ctx.notifier.active() {
        println!("{} {}", toast.toast_type.icon(), toast.message);
    }
}
