use crate::render;
use clap::{ArgGroup, Args};
use lead_signals::config::AppConfig;
use lead_signals::error::AppError;
use lead_signals::presets::PresetLoader;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["list", "show", "compare"])
))]
pub(crate) struct PresetArgs {
    /// List available presets
    #[arg(long)]
    pub(crate) list: bool,
    /// Show the signals and metadata of one preset
    #[arg(long, value_name = "NAME")]
    pub(crate) show: Option<String>,
    /// Compare the signal groups of two presets
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub(crate) compare: Option<Vec<String>>,
}

pub(crate) fn run_preset(config: &AppConfig, args: PresetArgs) -> Result<(), AppError> {
    let loader = PresetLoader::new(&config.presets_dir);

    if let Some(name) = args.show.as_deref() {
        let preset = loader.load(name)?;
        print!("{}", render::preset_detail_text(name, &preset));
        return Ok(());
    }

    if let Some([first, second]) = args.compare.as_deref() {
        let comparison = loader.compare(first, second)?;
        print!("{}", render::preset_comparison_text(&comparison));
        return Ok(());
    }

    let infos: Vec<_> = loader
        .list()?
        .into_iter()
        .map(|name| {
            loader
                .info(&name)
                .map_err(|err| format!("{name}: error - {err}"))
        })
        .collect();
    print!("{}", render::preset_list_text(&infos));
    println!("\nUse a preset with: lead-signals enrich --domain example.com --preset <name>");

    Ok(())
}
