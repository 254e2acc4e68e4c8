use crate::config::Config;
use crate::display::{
    display_thumbnails_table, display_universe_thumbnails_table, print_info, print_json,
};
use crate::errors::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::debug;
use rbxthumb_api::{RobloxClient, ThumbnailProvider};
use rbxthumb_core::{
    AvatarThumbnailType, CoreError, Thumbnail, ThumbnailFormat, ThumbnailOptions,
    ThumbnailReturnPolicy, ThumbnailSize, UniverseThumbnailOptions,
};

#[derive(Parser, Debug)]
#[command(name = "rbxthumb")]
#[command(about = "Fetch thumbnails and icons from the Roblox thumbnails API")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Formatting flags shared by every batch command
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Thumbnail size as WIDTHxHEIGHT, e.g. 150x150
    #[arg(long)]
    pub size: Option<ThumbnailSize>,

    /// Image format: png or jpeg
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ThumbnailFormat>,

    /// Request circular crops
    #[arg(long)]
    pub circular: bool,

    /// Request square crops even when the config asks for circular ones
    #[arg(long, conflicts_with = "circular")]
    pub no_circular: bool,
}

impl FormatArgs {
    /// `isCircular` as set on the command line, if at all
    pub fn is_circular(&self) -> Option<bool> {
        match (self.circular, self.no_circular) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Fallback when no thumbnail exists yet: place-holder, auto-generated or force-auto-generated
    #[arg(long, value_parser = parse_return_policy)]
    pub return_policy: Option<ThumbnailReturnPolicy>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Asset thumbnails
    Assets {
        /// Asset IDs (space or comma separated)
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// 3D thumbnail of one asset
    #[command(name = "asset-3d")]
    Asset3d { id: u64 },
    /// Badge icons
    Badges {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
    },
    /// Bundle thumbnails
    Bundles {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
    },
    /// Game pass icons
    GamePasses {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
    },
    /// Universe (game) icons
    UniverseIcons {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Universe (game) thumbnails, grouped per universe
    UniverseThumbnails {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
        /// Maximum thumbnails per universe
        #[arg(long)]
        count_per_universe: Option<u32>,
        /// Include default images for universes without uploads
        #[arg(long)]
        defaults: Option<bool>,
    },
    /// Group icons
    Groups {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
    },
    /// Place icons
    Places {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        #[command(flatten)]
        opts: FormatArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// User avatar renders
    Avatars {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
        /// Render type: full-body, bust or headshot
        #[arg(long = "type", default_value = "full-body")]
        avatar_type: AvatarThumbnailType,
        #[command(flatten)]
        opts: FormatArgs,
    },
    /// 3D avatar of one user
    #[command(name = "avatar-3d")]
    Avatar3d { id: u64 },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Show configuration file path
    Path,
}

/// Accepts `png`/`jpeg`/`jpg` in any case
pub fn parse_format(raw: &str) -> std::result::Result<ThumbnailFormat, CoreError> {
    match raw.trim().to_lowercase().as_str() {
        "jpg" => Ok(ThumbnailFormat::Jpeg),
        name => ThumbnailFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::InvalidArgument(format!("unknown format '{}'", raw))),
    }
}

/// Accepts `place-holder`, `PlaceHolder`, `place_holder` and so on
pub fn parse_return_policy(raw: &str) -> std::result::Result<ThumbnailReturnPolicy, CoreError> {
    let wanted: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();

    ThumbnailReturnPolicy::ALL
        .into_iter()
        .find(|policy| policy.as_str().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| CoreError::InvalidArgument(format!("unknown return policy '{}'", raw)))
}

/// Merge command line flags with the `[defaults]` config section.
/// Flags win; `apply_default_size` is off for avatars, which have per-type sizes.
pub fn resolve_options(
    args: &FormatArgs,
    return_policy: Option<ThumbnailReturnPolicy>,
    config: &Config,
    apply_default_size: bool,
) -> ThumbnailOptions {
    let defaults = &config.data.defaults;

    let size = match args.size {
        Some(size) => Some(size),
        None if apply_default_size => defaults.size,
        None => None,
    };

    ThumbnailOptions {
        size,
        format: args.format.or(defaults.format),
        is_circular: args.is_circular().or(defaults.circular),
        return_policy,
    }
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG still wins when set
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

pub async fn run_cli() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new()?;
    run(cli, &config).await
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let json = cli.json;

    if let Commands::Config { action } = &cli.command {
        return handle_config(action, config);
    }

    let client = RobloxClient::from_config(config)?;
    let thumbnails = client.thumbnails();
    debug!("Using base domain {}", client.urls().base_domain());

    match cli.command {
        Commands::Assets {
            ids,
            opts,
            policy,
        } => {
            let options = resolve_options(&opts, policy.return_policy, config, true);
            show(thumbnails.get_asset_thumbnails(&ids, &options).await?, json)
        }
        Commands::Asset3d { id } => show(vec![thumbnails.get_asset_thumbnail_3d(id).await?], json),
        Commands::Badges { ids, opts } => {
            let options = resolve_options(&opts, None, config, true);
            show(thumbnails.get_badge_icons(&ids, &options).await?, json)
        }
        Commands::Bundles { ids, opts } => {
            let options = resolve_options(&opts, None, config, true);
            show(thumbnails.get_bundle_thumbnails(&ids, &options).await?, json)
        }
        Commands::GamePasses { ids, opts } => {
            let options = resolve_options(&opts, None, config, true);
            show(thumbnails.get_gamepass_icons(&ids, &options).await?, json)
        }
        Commands::UniverseIcons {
            ids,
            opts,
            policy,
        } => {
            let options = resolve_options(&opts, policy.return_policy, config, true);
            show(thumbnails.get_universe_icons(&ids, &options).await?, json)
        }
        Commands::UniverseThumbnails {
            ids,
            opts,
            count_per_universe,
            defaults,
        } => {
            handle_universe_thumbnails(
                &thumbnails,
                &ids,
                &opts,
                count_per_universe,
                defaults,
                config,
                json,
            )
            .await
        }
        Commands::Groups { ids, opts } => {
            let options = resolve_options(&opts, None, config, true);
            show(thumbnails.get_group_icons(&ids, &options).await?, json)
        }
        Commands::Places {
            ids,
            opts,
            policy,
        } => {
            let options = resolve_options(&opts, policy.return_policy, config, true);
            show(thumbnails.get_place_icons(&ids, &options).await?, json)
        }
        Commands::Avatars {
            ids,
            avatar_type,
            opts,
        } => {
            let options = resolve_options(&opts, None, config, false);
            show(
                thumbnails
                    .get_user_avatars(&ids, avatar_type, &options)
                    .await?,
                json,
            )
        }
        Commands::Avatar3d { id } => show(vec![thumbnails.get_user_avatar_3d(id).await?], json),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

async fn handle_universe_thumbnails(
    thumbnails: &ThumbnailProvider,
    ids: &[u64],
    format: &FormatArgs,
    count_per_universe: Option<u32>,
    defaults: Option<bool>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let mut options: UniverseThumbnailOptions = resolve_options(format, None, config, true).into();
    options.count_per_universe = count_per_universe;
    options.defaults = defaults;

    let universes = thumbnails.get_universe_thumbnails(ids, &options).await?;
    if json {
        print_json(&universes)
    } else {
        display_universe_thumbnails_table(&universes);
        Ok(())
    }
}

fn handle_config(action: &ConfigCommands, config: &Config) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            print!("{}", config.show_config()?);
        }
        ConfigCommands::Path => {
            print_info(&format!("{}", config.config_path.display()));
        }
    }
    Ok(())
}

fn show(thumbnails: Vec<Thumbnail>, json: bool) -> Result<()> {
    if json {
        print_json(&thumbnails)
    } else {
        display_thumbnails_table(&thumbnails);
        Ok(())
    }
}
