use lanterne::{cli, utils};

fn main() {
  env_logger::init();
  let exit_code = cli::run(utils::get_args());
  std::process::exit(exit_code);
}
