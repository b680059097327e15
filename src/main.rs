fn main() {
    if let Err(err) = csv2avro::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
