use clap::Parser;
use eyes_core::Variant;
use std::path::PathBuf;

/// Pixel eyes in a desktop window.
#[derive(Parser, Debug)]
#[command(name = "eyes-native", version, about)]
pub struct Args {
    /// Scene variant: perspective, orthographic or responsive
    pub variant: Option<String>,

    /// Directory holding the textures and the model
    #[arg(default_value = "assets")]
    pub asset_dir: PathBuf,
}

impl Args {
    pub fn variant(&self) -> Variant {
        Variant::from_name_or_default(self.variant.as_deref())
    }
}
