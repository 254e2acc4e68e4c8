use rbxthumb::cli::run_cli;
use rbxthumb::display::print_error;

#[tokio::main]
async fn main() {
    match run_cli().await {
        Ok(()) => {
            // Success - no additional output needed
        }
        Err(e) => {
            print_error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
