use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    qchat::cli::main()
}
