use sharkwire::{ConsoleStatus, Scenario};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scenario = args.next().unwrap_or_else(|| "ready".to_string());
    let command = args.next().unwrap_or_else(|| "ATZ".to_string());

    let scenario = Scenario::parse(&scenario).unwrap_or_else(|| {
        eprintln!(
            "Unknown scenario '{}'. Supported: ready, absent, busy, busy:<bytes>",
            scenario
        );
        std::process::exit(1);
    });

    // AT commands end with a carriage return.
    let mut command = command.into_bytes();
    command.push(b'\r');

    match sharkwire::run(scenario, &command, &mut ConsoleStatus) {
        Ok(session) => {
            println!("Sent {} of {} bytes", session.sent, command.len());
            if !session.received.is_empty() {
                println!(
                    "Modem received: {:?}",
                    String::from_utf8_lossy(&session.received)
                );
            }
        }
        Err(err) => {
            // Bus errors mean the cartridge is missing or mapped wrongly.
            log::error!("{err:#}");
            eprintln!("Fatal: {err:#}");
            std::process::exit(1);
        }
    }
}
