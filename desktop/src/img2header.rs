use std::process::ExitCode;

use argh::FromArgs;
use epd_asset::{Config, LogProgress};
use log::{error, info};

#[derive(FromArgs)]
/// Convert an image into a 1-bit e-paper bitmap and a C header for the firmware
struct Args {
    /// input image path
    #[argh(option, short = 'i')]
    input: Option<String>,

    /// preview BMP path
    #[argh(option, short = 'p')]
    preview: Option<String>,

    /// output header path
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// array name in the generated header
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// description comment in the generated header
    #[argh(option)]
    description: Option<String>,

    /// canvas width in pixels
    #[argh(option)]
    width: Option<u32>,

    /// canvas height in pixels
    #[argh(option)]
    height: Option<u32>,

    /// luminance threshold, darker pixels become black
    #[argh(option, short = 't')]
    threshold: Option<u8>,

    /// check an existing header against its preview instead of converting
    #[argh(switch)]
    verify: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            input: self.input.map(Into::into).unwrap_or(defaults.input),
            preview: self.preview.map(Into::into).unwrap_or(defaults.preview),
            header: self.output.map(Into::into).unwrap_or(defaults.header),
            name: self.name.unwrap_or(defaults.name),
            description: self.description.unwrap_or(defaults.description),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            threshold: self.threshold.unwrap_or(defaults.threshold),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let verify = args.verify;
    let config = args.into_config();

    let result = if verify {
        epd_asset::verify(&config).map(|bytes| {
            info!(
                "{} matches {} ({bytes} bytes)",
                config.header.display(),
                config.preview.display()
            );
        })
    } else {
        epd_asset::run(&config, &mut LogProgress).map(|artifacts| {
            info!(
                "Done: {} and {}",
                artifacts.preview.display(),
                artifacts.header.display()
            );
        })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
