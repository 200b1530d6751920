//! # Placard CLI
//!
//! Command-line interface for batch card generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate cards for every line of links.txt
//! placard generate links.txt --output cards --template 1 --theme "Blue Ocean"
//!
//! # Pull the palette from the logo instead of a theme
//! placard generate links.txt --logo logo.png --logo-colors
//!
//! # Render a single payload to one file
//! placard preview "https://example.com" --out card.png --template 5
//!
//! # List templates (built-in and custom)
//! placard templates list
//!
//! # Register a custom script template
//! placard templates add --name "Banner" --description "Wide banner" --file banner.rhai
//!
//! # Show past runs
//! placard history
//! ```

use std::path::PathBuf;
use std::sync::mpsc;

use clap::{Parser, Subcommand};

use placard::{
    color::{self, Palette, DEFAULT_PALETTE, THEME_PRESETS},
    encode, palette,
    template::{self, TextSettings},
    JobEvent, JobSpec, OutputFormat, PlacardError, Store,
};

/// Placard - styled QR code card generator
#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding history/template/preset files
    #[arg(long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct TextArgs {
    /// Title text drawn on every card
    #[arg(long, default_value = "VPN Configuration")]
    title: String,

    /// Subtitle text drawn on every card
    #[arg(long, default_value = "Scan to Connect")]
    subtitle: String,

    /// Label prefix; record labels are "{prefix} {index}"
    #[arg(long, default_value = "VPN")]
    prefix: String,

    /// Title font size in pixels
    #[arg(long, default_value = "32")]
    title_size: f32,

    /// Subtitle font size in pixels
    #[arg(long, default_value = "18")]
    subtitle_size: f32,

    /// Label font size in pixels
    #[arg(long, default_value = "24")]
    name_size: f32,

    /// Text color as 6 hex digits
    #[arg(long, default_value = "#FFFFFF")]
    text_color: String,
}

#[derive(clap::Args, Debug)]
struct PaletteArgs {
    /// Theme preset name (see `placard themes`)
    #[arg(long)]
    theme: Option<String>,

    /// Three explicit colors as hex strings, overriding the theme
    #[arg(long, num_args = 3, value_names = ["PRIMARY", "SECONDARY", "TERTIARY"])]
    colors: Option<Vec<String>>,

    /// Extract the palette from the logo image
    #[arg(long)]
    logo_colors: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate cards for every non-empty line of an input file
    Generate {
        /// Input file with one payload per line
        input: PathBuf,

        /// Output directory (created if missing)
        #[arg(long, short, default_value = "qr_results")]
        output: PathBuf,

        /// Template id (1-8 built-in, >8 custom)
        #[arg(long, short, default_value = "1")]
        template: u32,

        /// Logo image composited onto each code
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Output format: png, jpg, or webp
        #[arg(long, default_value = "png")]
        format: String,

        /// Module scale in pixels
        #[arg(long, default_value = "15")]
        scale: u32,

        /// Quiet-zone border in modules
        #[arg(long, default_value = "1")]
        border: u32,

        #[command(flatten)]
        palette: PaletteArgs,

        #[command(flatten)]
        text: TextArgs,
    },

    /// Render a single payload to one card file
    Preview {
        /// Payload to encode
        payload: String,

        /// Output file
        #[arg(long, default_value = "preview.png")]
        out: PathBuf,

        /// Template id
        #[arg(long, short, default_value = "1")]
        template: u32,

        /// Logo image composited onto the code
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Module scale in pixels
        #[arg(long, default_value = "15")]
        scale: u32,

        /// Quiet-zone border in modules
        #[arg(long, default_value = "1")]
        border: u32,

        #[command(flatten)]
        palette: PaletteArgs,

        #[command(flatten)]
        text: TextArgs,
    },

    /// Manage templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Show past generation runs
    History,

    /// List theme presets
    Themes,
}

#[derive(Subcommand, Debug)]
enum TemplateAction {
    /// List built-in and custom templates
    List,

    /// Validate and register a custom script template
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// File containing the template script
        #[arg(long)]
        file: PathBuf,
    },

    /// Update an existing custom template
    Edit {
        /// Custom template id (> 8)
        id: u32,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// File containing the new template script
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PlacardError> {
    let cli = Cli::parse();
    let store = Store::new(&cli.data_dir);

    match cli.command {
        Commands::Generate {
            input,
            output,
            template,
            logo,
            format,
            scale,
            border,
            palette: palette_args,
            text,
        } => {
            let palette = resolve_palette(&palette_args, logo.as_deref())?;
            let spec = JobSpec {
                input_file: input,
                output_dir: output,
                template_id: template,
                custom_templates: store.load_templates(),
                palette,
                text: text_settings(&text)?,
                logo,
                format: format.parse::<OutputFormat>()?,
                scale,
                border,
            };

            let (tx, rx) = mpsc::channel();
            let handle = placard::job::spawn(spec, cli.data_dir.clone(), tx);

            let mut last = 0u8;
            let mut failed = false;
            for event in rx {
                match event {
                    JobEvent::Progress(p) => {
                        if p != last {
                            println!("Generating... {}%", p);
                            last = p;
                        }
                    }
                    JobEvent::Finished { success, message } => {
                        println!("{}", message);
                        failed = !success;
                    }
                }
            }
            let _ = handle.join();
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Preview {
            payload,
            out,
            template: template_id,
            logo,
            scale,
            border,
            palette: palette_args,
            text,
        } => {
            let palette = resolve_palette(&palette_args, logo.as_deref())?;
            let template = template::resolve(template_id, &store.load_templates())?;
            let settings = text_settings(&text)?;

            let data = encode::normalize(&payload);
            let bitmap = encode::encode(&data, scale, border)?;
            let label = format!("{} 1", settings.name_prefix);
            let card = template.render(&bitmap, &label, &palette, logo.as_deref(), &settings)?;
            card.save(&out)
                .map_err(|e| PlacardError::Image(format!("Failed to save preview: {}", e)))?;
            println!("Saved to {}", out.display());
        }

        Commands::Templates { action } => match action {
            TemplateAction::List => {
                println!("Built-in templates:");
                for (id, name) in template::BUILTINS {
                    println!("  {:>3}  {}", id, name);
                }
                let customs = store.load_templates();
                if !customs.is_empty() {
                    println!("\nCustom templates:");
                    for def in customs {
                        println!("  {:>3}  {} - {}", def.id, def.name, def.description);
                    }
                }
            }
            TemplateAction::Add { name, description, file } => {
                let code = std::fs::read_to_string(&file)?;
                let id = store.add_template(&name, &description, &code)?;
                println!("Template '{}' added with id {}", name, id);
            }
            TemplateAction::Edit { id, name, description, file } => {
                let code = std::fs::read_to_string(&file)?;
                store.edit_template(id, &name, &description, &code)?;
                println!("Template {} updated", id);
            }
        },

        Commands::History => {
            let history = store.load_history();
            if history.is_empty() {
                println!("No generation history yet.");
            } else {
                for record in history {
                    println!(
                        "{}  {:<20} {:>5}  {}",
                        record.date, record.template, record.count, record.output_dir
                    );
                }
            }
        }

        Commands::Themes => {
            println!("Theme presets:");
            for (name, palette) in THEME_PRESETS {
                let swatches: Vec<String> = palette
                    .iter()
                    .map(|c| format!("#{:02X}{:02X}{:02X}", c[0], c[1], c[2]))
                    .collect();
                println!("  {:<14} {}", name, swatches.join(" "));
            }
        }
    }

    Ok(())
}

/// Build text settings, rejecting a malformed color up front so templates
/// can rely on a parseable value.
fn text_settings(args: &TextArgs) -> Result<TextSettings, PlacardError> {
    color::parse_hex(&args.text_color)?;
    Ok(TextSettings {
        title: args.title.clone(),
        subtitle: args.subtitle.clone(),
        name_prefix: args.prefix.clone(),
        title_size: args.title_size,
        subtitle_size: args.subtitle_size,
        name_size: args.name_size,
        color: args.text_color.clone(),
    })
}

/// Pick the job palette: explicit colors win, then logo extraction, then a
/// named theme, then the neutral default.
fn resolve_palette(args: &PaletteArgs, logo: Option<&std::path::Path>) -> Result<Palette, PlacardError> {
    if let Some(colors) = &args.colors {
        let mut palette = DEFAULT_PALETTE;
        for (slot, hex) in palette.iter_mut().zip(colors.iter()) {
            *slot = color::parse_hex(hex)?;
        }
        return Ok(palette);
    }
    if args.logo_colors {
        let path = logo.ok_or_else(|| {
            PlacardError::Validation("--logo-colors requires --logo".to_string())
        })?;
        return Ok(palette::extract(path));
    }
    if let Some(theme) = &args.theme {
        return color::theme_by_name(theme).ok_or_else(|| {
            PlacardError::Validation(format!(
                "Unknown theme '{}'. Run `placard themes` to list presets.",
                theme
            ))
        });
    }
    Ok(DEFAULT_PALETTE)
}
