use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use clap::Parser;
use skin_util::{
    compose_view, extract_part,
    infrastructure::filesystem::config::load_skin_config,
    SkinImage, SkinLoader, SkinPart, SkinTexture, SkinView,
};

#[derive(Parser)]
#[command(name = "skin-render", version, about = "Render Minecraft skin parts and views")]
struct Args {
    /// Player UUID to look up on the session server
    #[arg(long, conflicts_with = "file")]
    uuid: Option<String>,

    /// Local skin PNG instead of a player lookup
    #[arg(long)]
    file: Option<PathBuf>,

    /// Treat the local skin as the slim model
    #[arg(long, requires = "file")]
    slim: bool,

    /// View to render (front, back, left, right, top, bottom)
    #[arg(long, default_value = "front")]
    view: String,

    /// Render a single part instead of a view, e.g. HEAD_FRONT
    #[arg(long, conflicts_with = "cape")]
    part: Option<String>,

    /// Pixels per texel (1-50), defaults to the configured scale
    #[arg(long)]
    scale: Option<u32>,

    /// Render the player's cape instead of the skin
    #[arg(long, requires = "uuid")]
    cape: bool,

    /// Output PNG path; a data URI is printed when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "SKIN_UTIL_CONFIG", default_value = "skin_config.json")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let config = load_skin_config(&args.config).map_err(anyhow::Error::msg)?;
    let scale = args.scale.unwrap_or(config.default_scale);
    let loader = SkinLoader::new(config)?;

    let image = if args.cape {
        render_cape(&loader, args.uuid.as_deref().unwrap_or_default())?
    } else {
        let texture = load_texture(&loader, &args)?;
        match args.part.as_deref() {
            Some(part) => extract_part(&texture, part.parse::<SkinPart>()?, scale)?,
            None => compose_view(&texture, args.view.parse::<SkinView>()?, scale)?,
        }
    };

    match args.output {
        Some(path) => {
            let bytes = image.to_bytes();
            if bytes.is_empty() {
                bail!("No se pudo codificar la imagen");
            }
            fs::write(&path, bytes).with_context(|| format!("No se pudo guardar {}", path.display()))?;
            log::info!("Imagen {}x{} guardada en {}", image.width(), image.height(), path.display());
        }
        None => println!("{}", image.to_data_uri()),
    }

    Ok(())
}

fn load_texture(loader: &SkinLoader, args: &Args) -> anyhow::Result<Arc<SkinTexture>> {
    if let Some(path) = args.file.as_ref() {
        let bytes = fs::read(path).with_context(|| format!("No se pudo leer {}", path.display()))?;
        return Ok(Arc::new(SkinTexture::from_png_bytes(&bytes, args.slim)?));
    }
    match args.uuid.as_deref() {
        Some(uuid) => Ok(loader.player_skin_by_id(uuid)),
        None => bail!("Indica --uuid o --file"),
    }
}

fn render_cape(loader: &SkinLoader, uuid: &str) -> anyhow::Result<SkinImage> {
    let profile = loader.fetch_profile(uuid)?;
    match loader.player_cape(&profile) {
        Some(cape) => Ok(cape),
        None => bail!("{} no tiene capa", profile.name),
    }
}
