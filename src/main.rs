use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use trivia_cards::{
    language_inputs, language_output, load_logo, run_batch, run_job, timestamped, CardError,
    Config, Job, DEFAULT_OUTPUT,
};

#[derive(Parser, Debug)]
#[command(version, about = "Render trivia questions as printable card sheets", long_about = None)]
struct Args {
    /// JSON file holding an array of question records
    #[arg(value_name = "INPUT", default_value = "questions.json")]
    input: PathBuf,
    /// Where to write the card deck
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Also write an answer sheet next to the deck
    #[arg(long)]
    answers: bool,
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Logo image placed on every card
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,
    /// Render every *.json in DIR, one deck per language
    #[arg(long, value_name = "DIR", conflicts_with = "input")]
    lang_dir: Option<PathBuf>,
    /// Append the current date and time to output file names
    #[arg(long)]
    timestamp: bool,
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    if let Err(error) = fallible_main(args) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main(args: Args) -> Result<(), CardError> {
    log::debug!("{:?}", args);

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    if let Some(logo) = args.logo {
        config.logo = Some(logo);
    }
    // fail on a bad page size before any input is read
    config.grid()?;

    let logo = load_logo(config.logo.as_deref());

    let output = if args.timestamp {
        timestamped(&args.output, chrono::Local::now().naive_local())
    } else {
        args.output
    };

    if let Some(dir) = args.lang_dir {
        let jobs: Vec<Job> = language_inputs(&dir)?
            .into_iter()
            .map(|(language, input)| Job {
                input,
                output: language_output(&output, &language),
                answers: args.answers,
            })
            .collect();
        log::info!("found {} language file(s) in {:?}", jobs.len(), dir);

        if run_batch(&jobs, &config, logo.as_ref()) == 0 {
            return Err(CardError::NothingProcessed(dir));
        }
        return Ok(());
    }

    let job = Job {
        input: args.input,
        output,
        answers: args.answers,
    };
    run_job(&job, &config, logo.as_ref())?;
    Ok(())
}
