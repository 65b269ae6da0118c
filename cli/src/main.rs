mod commands;
mod terminal;

use commands::{CommandLine, Commands, colors, controls, convert, script, syllabify};
use scriptor_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        force: commands.force,
        strict: commands.strict,
    };

    print::banner(&cfg);

    match commands.command {
        Commands::Script {
            format,
            output,
            arguments,
        } => {
            print::header("extracting script", cfg.quiet);
            script::script(format, output, &arguments, &cfg)
        }
        Commands::Convert {
            rtf_dir,
            jsonl_dir,
            output,
            tags,
        } => {
            print::header("converting discussions", cfg.quiet);
            convert::convert(rtf_dir, jsonl_dir, output, &tags, &cfg)
        }
        Commands::Colors { file } => {
            print::header("colour table", cfg.quiet);
            colors::colors(&file, &cfg)
        }
        Commands::Controls { file } => {
            print::header("control sequences", cfg.quiet);
            controls::controls(&file, &cfg)
        }
        Commands::Syllabify { filter, namefile } => {
            print::header("syllabifying names", cfg.quiet);
            syllabify::syllabify(&namefile, filter)
        }
    }
}
