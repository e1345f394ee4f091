use std::path::{Path, PathBuf};

use argh::FromArgs;

use imsmooth::imgproc::{
    self,
    filter::{Reduction, DEFAULT_FILTER_SIZE},
    parallel::ExecutionStrategy,
};
use imsmooth::io::functional as F;

#[derive(FromArgs, Debug)]
/// Smooth a noisy grayscale image with mean and median filters and report their PSNR.
struct Args {
    /// path to the noisy image
    #[argh(option, short = 'i')]
    noisy: PathBuf,

    /// path to the ground truth image; the noisy image is used when missing
    #[argh(option, short = 'r')]
    reference: Option<PathBuf>,

    /// size of the square filter window, a positive odd number
    #[argh(option, short = 'k', default = "DEFAULT_FILTER_SIZE")]
    filter_size: usize,

    /// evaluate the rows of the output in parallel
    #[argh(switch)]
    parallel: bool,

    /// directory where the smoothed images are written as png
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,
}

/// Writes `image` as `{name}.png` into `output_dir`, creating the directory first.
fn write_smoothed(
    output_dir: &Path,
    name: &str,
    image: &imsmooth::image::Image<u8, 1>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(format!("{name}.png"));
    F::write_image_png_mono8(&output_path, image)?;
    Ok(output_path)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let noisy = F::read_image_any_mono8(&args.noisy)?;
    let reference = match &args.reference {
        Some(path) => F::read_image_any_mono8(path)?,
        None => {
            log::warn!("no reference image given, comparing against the noisy input");
            noisy.clone()
        }
    };

    log::info!(
        "read {} ({}), filter size {}",
        args.noisy.display(),
        noisy.size(),
        args.filter_size
    );

    let strategy = if args.parallel {
        ExecutionStrategy::ParallelRows
    } else {
        ExecutionStrategy::Serial
    };

    println!(
        "PSNR score of the input: {:.4}",
        imgproc::metrics::psnr(&reference, &noisy)?
    );

    for (name, reduction) in [("mean", Reduction::Mean), ("median", Reduction::Median)] {
        let smoothed = imgproc::filter::window_filter(&noisy, args.filter_size, reduction, strategy)?;
        let score = imgproc::metrics::psnr(&reference, &smoothed)?;

        println!("PSNR score of {name} filter: {score:.4}");

        if let Some(output_dir) = &args.output_dir {
            let output_path = write_smoothed(output_dir, name, &smoothed)?;
            log::info!("wrote {}", output_path.display());
        }
    }

    Ok(())
}
