fn main() {
    if let Err(err) = contrib_svg::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
