use rescache::font::{Font, FontOptions};
use rescache::texture::{Texture, TextureOptions};
use rescache::{Handle, LoadError, ResourceManager, Resources};

const USAGE: &str = "usage: example <resource root> [texture...] [--font <sheet>:<size>...]";

fn parse_font(arg: &str) -> Result<(&str, FontOptions), LoadError> {
    let mut parts = arg.rsplitn(2, ':');
    let size = parts.next().unwrap_or("");
    let sheet = parts
        .next()
        .ok_or_else(|| LoadError::InvalidOptions(format!("expected <sheet>:<size>, got '{}'", arg)))?;
    let size = size
        .parse::<u32>()
        .map_err(|e| LoadError::InvalidOptions(format!("bad font size in '{}': {}", arg, e)))?;

    Ok((sheet, FontOptions { size }))
}

fn main() -> Result<(), LoadError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let root = match args.next() {
        Some(root) => root,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let mut resources = Resources::new(root);
    let mut textures: Vec<Handle<Texture>> = Vec::new();
    let mut fonts: Vec<Handle<Font>> = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--font" {
            let font_arg = args.next().ok_or_else(|| {
                LoadError::InvalidOptions(String::from("--font needs <sheet>:<size>"))
            })?;
            let (sheet, options) = parse_font(&font_arg)?;
            let name = format!("{}@{}", sheet, options.size);
            fonts.push(resources.load_resource(sheet, &name, options));
        } else {
            textures.push(resources.load_resource(&arg, &arg, TextureOptions));
        }
    }

    for handle in textures.iter().filter(|h| !h.is_null()) {
        if let Some(texture) = resources.get_resource(handle) {
            println!(
                "texture {}: {}x{} {:?}",
                handle,
                texture.width(),
                texture.height(),
                texture.format()
            );
        }
    }

    for handle in fonts.iter().filter(|h| !h.is_null()) {
        if let Some(font) = resources.get_resource(handle) {
            println!(
                "font {}: atlas {:?}, 'Hello' is {} px wide",
                handle,
                font.texture().extent(),
                font.text_width("Hello")
            );
        }
    }

    let failed = textures.iter().filter(|h| h.is_null()).count()
        + fonts.iter().filter(|h| h.is_null()).count();
    let reloaded = resources.reload_all();
    println!(
        "{} loaded, {} failed, {} reloaded",
        resources.count(),
        failed,
        reloaded
    );

    Ok(())
}
