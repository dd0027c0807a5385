use crate::classify::Mode;
use spotter_infer::ModelProfile;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Options {
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub synthetic: bool,
    pub mode: Mode,
    pub profile: ModelProfile,
    pub fast_model: Option<PathBuf>,
    pub accurate_model: Option<PathBuf>,
    pub labels: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
            synthetic: false,
            mode: Mode::Detection,
            profile: ModelProfile::Fast,
            fast_model: None,
            accurate_model: None,
            labels: None,
        }
    }
}

pub fn usage() -> String {
    "usage: spotter [options]\n\
     \n\
     --device PATH          capture device (default /dev/video0)\n\
     --width N              capture width (default 640)\n\
     --height N             capture height (default 480)\n\
     --fps N                capture rate (default 30)\n\
     --synthetic            use the synthetic camera instead of hardware\n\
     --classify             start in classification mode (default: detection)\n\
     --accurate             start with the accurate profile (default: fast)\n\
     --model-fast PATH      onnx model for the fast profile\n\
     --model-accurate PATH  onnx model for the accurate profile\n\
     --labels PATH          JSON array of class labels\n\
     \n\
     commands on stdin: <enter>/c classify, m toggle mode, p toggle profile, q quit"
        .to_string()
}

pub fn parse(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut args = args;

    fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
        args.next().ok_or_else(|| format!("{flag} needs a value"))
    }

    fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<u32, String> {
        value(args, flag)?
            .parse()
            .map_err(|_| format!("{flag} needs a number"))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--device" => opts.device = value(&mut args, "--device")?,
            "--width" => opts.width = number(&mut args, "--width")?,
            "--height" => opts.height = number(&mut args, "--height")?,
            "--fps" => opts.fps = number(&mut args, "--fps")?,
            "--synthetic" => opts.synthetic = true,
            "--classify" => opts.mode = Mode::Classification,
            "--accurate" => opts.profile = ModelProfile::Accurate,
            "--model-fast" => opts.fast_model = Some(PathBuf::from(value(&mut args, "--model-fast")?)),
            "--model-accurate" => {
                opts.accurate_model = Some(PathBuf::from(value(&mut args, "--model-accurate")?))
            }
            "--labels" => opts.labels = Some(PathBuf::from(value(&mut args, "--labels")?)),
            "--help" | "-h" => return Err(usage()),
            other => return Err(format!("unknown argument: {other}\n\n{}", usage())),
        }
    }

    Ok(opts)
}
