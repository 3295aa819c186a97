//! Preview — interactive shell for rendering templates and random prompts.
//!
//! Usage: preview [--templates <path>] [--categories <path>] [--fields <path>]
//!                [--seed <n>] [--window <n>]
//!
//! Commands:
//!   list                  — list templates
//!   template <name>       — render a template as JSON and natural language
//!   random [n]            — generate n random prompts with the diverse picker
//!   presets               — list field presets and their categories
//!   preset <name>         — fill a full prompt record from a preset
//!   model <image|video>   — switch the category set used by `random`
//!   compact               — toggle compact JSON output
//!   seed <n>              — reseed the picker (clears its history)
//!   help                  — list commands
//!   quit                  — exit

use image_prompt::core::diversity::DiversePicker;
use image_prompt::core::random::{build_random_prompt, flatten_prompt_to_text};
use image_prompt::core::render::{
    generate_compact_json, generate_json, generate_natural_language,
};
use image_prompt::schema::category::{CategoryCatalog, ModelKind};
use image_prompt::schema::fields::FieldCatalog;
use image_prompt::templates::TemplateSet;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LINE_WIDTH: usize = 60;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut templates_path = None;
    let mut categories_path = None;
    let mut fields_path = None;
    let mut seed: u64 = 42;
    let mut window: usize = image_prompt::core::diversity::DEFAULT_RECENT_WINDOW;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--templates" if i + 1 < args.len() => {
                i += 1;
                templates_path = Some(args[i].clone());
            }
            "--categories" if i + 1 < args.len() => {
                i += 1;
                categories_path = Some(args[i].clone());
            }
            "--fields" if i + 1 < args.len() => {
                i += 1;
                fields_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = parse_flag_value("--seed", &args[i]);
            }
            "--window" if i + 1 < args.len() => {
                i += 1;
                window = parse_flag_value("--window", &args[i]);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut templates = match TemplateSet::builtin() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("ERROR: Failed to load built-in templates: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(ref path) = templates_path {
        match TemplateSet::load_from_ron(Path::new(path)) {
            Ok(set) => templates.merge(set),
            Err(e) => eprintln!("WARNING: Failed to load {}: {}", path, e),
        }
    }

    let catalog = match categories_path {
        Some(ref path) => CategoryCatalog::load_from_ron(Path::new(path)),
        None => CategoryCatalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load categories: {}", e);
            std::process::exit(1);
        }
    };

    let fields = match fields_path {
        Some(ref path) => FieldCatalog::load_from_ron(Path::new(path)),
        None => FieldCatalog::builtin(),
    };
    let fields = match fields {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("ERROR: Failed to load field catalog: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} templates", templates.len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    // Session state
    let mut model = ModelKind::Image;
    let mut compact = false;
    let mut picker: DiversePicker = DiversePicker::builder()
        .window_size(window)
        .seed(seed)
        .build();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "list" | "l" => {
                for (name, description) in templates.list() {
                    println!("  {:<20} {}", name, description);
                }
            }
            "template" | "t" => {
                let Some(name) = parts.get(1) else {
                    println!("Usage: template <name>");
                    continue;
                };
                let Some(template) = templates.get(name) else {
                    println!("Template '{}' not found. Try 'list'.", name);
                    continue;
                };
                let json = if compact {
                    generate_compact_json(&template.prompt)
                } else {
                    generate_json(&template.prompt)
                };
                match json {
                    Ok(json) => {
                        print_block("JSON", &json);
                        print_block(
                            "NATURAL LANGUAGE",
                            &wrap_text(&generate_natural_language(&template.prompt), LINE_WIDTH),
                        );
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "random" | "r" => {
                let count: usize = parts.get(1).and_then(|n| n.parse().ok()).unwrap_or(1);
                let categories = catalog.categories_for(model);
                for _ in 0..count {
                    let prompt = match build_random_prompt(&categories, |key, options| {
                        picker.pick(key, options)
                    }) {
                        Ok(prompt) => prompt,
                        Err(e) => {
                            println!("ERROR: {}", e);
                            break;
                        }
                    };
                    match prompt.to_json(!compact) {
                        Ok(json) => print_block("RANDOM JSON", &json),
                        Err(e) => println!("ERROR: {}", e),
                    }
                    print_block(
                        "RANDOM TEXT",
                        &wrap_text(&flatten_prompt_to_text(&prompt), LINE_WIDTH),
                    );
                }
            }
            "presets" => {
                for name in fields.preset_names() {
                    match fields.categories_for_preset(name) {
                        Ok(categories) => println!("  {:<12} {}", name, categories.join(", ")),
                        Err(e) => println!("  {:<12} ERROR: {}", name, e),
                    }
                }
            }
            "preset" | "p" => {
                let Some(name) = parts.get(1) else {
                    println!("Usage: preset <name>");
                    continue;
                };
                let prompt = fields.categories_for_preset(name).and_then(|categories| {
                    fields.random_prompt(&categories, |key, options| picker.pick(key, options))
                });
                let prompt = match prompt {
                    Ok(prompt) => prompt,
                    Err(e) => {
                        println!("ERROR: {}", e);
                        continue;
                    }
                };
                let json = if compact {
                    generate_compact_json(&prompt)
                } else {
                    generate_json(&prompt)
                };
                match json {
                    Ok(json) => {
                        print_block("PRESET JSON", &json);
                        print_block(
                            "NATURAL LANGUAGE",
                            &wrap_text(&generate_natural_language(&prompt), LINE_WIDTH),
                        );
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "model" => match parts.get(1).map(|s| s.to_lowercase()).as_deref() {
                Some("image") => {
                    model = ModelKind::Image;
                    println!("Using image categories.");
                }
                Some("video") => {
                    model = ModelKind::Video;
                    println!("Using video categories.");
                }
                _ => println!("Usage: model <image|video>"),
            },
            "compact" => {
                compact = !compact;
                println!("Compact JSON {}.", if compact { "on" } else { "off" });
            }
            "seed" => {
                let Some(new_seed) = parts.get(1).and_then(|n| n.parse::<u64>().ok()) else {
                    println!("Usage: seed <n>");
                    continue;
                };
                picker = DiversePicker::builder()
                    .window_size(window)
                    .seed(new_seed)
                    .build();
                println!("Seed set to {}.", new_seed);
            }
            _ => {
                println!("Unknown command '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Usage: preview [--templates <path>] [--categories <path>] [--fields <path>] [--seed <n>] [--window <n>]");
    println!();
    println!("Options:");
    println!("  --templates <path>   Extra templates RON file (overrides built-ins by name)");
    println!("  --categories <path>  Category catalog RON file (replaces built-ins)");
    println!("  --fields <path>      Field catalog RON file for presets (replaces built-ins)");
    println!("  --seed <n>           Picker seed (default 42)");
    println!("  --window <n>         Recent-pick window per field (default 5)");
}

fn print_help() {
    println!("Commands:");
    println!("  list                 List templates");
    println!("  template <name>      Render a template");
    println!("  random [n]           Generate n random prompts");
    println!("  presets              List field presets");
    println!("  preset <name>        Fill a prompt record from a preset");
    println!("  model <image|video>  Switch category set for random prompts");
    println!("  compact              Toggle compact JSON");
    println!("  seed <n>             Reseed the picker");
    println!("  help                 Show this help");
    println!("  quit                 Exit");
}

/// Parse a numeric flag value, exiting with the usage text when it is invalid.
fn parse_flag_value<T: std::str::FromStr>(flag: &str, value: &str) -> T {
    match parse_number(flag, value) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn print_block(title: &str, body: &str) {
    let line = "-".repeat(LINE_WIDTH);
    println!("\n{}\n {}\n{}\n{}\n", line, title, line, body);
}

fn wrap_text(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
