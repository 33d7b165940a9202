use openalias::{lookup_coin, resolver::resolve_txt, Config, Transport};
use std::{env, process};

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut args = env::args();

    let program = args.next();

    let (alias, ticker, transport) = match (args.next(), args.next(), args.next(), args.next()) {
        (Some(alias), Some(ticker), transport, None) => (alias, ticker, transport),
        _ => usage(program.as_deref()),
    };

    let transport = match transport.as_deref().map(str::parse::<Transport>) {
        None => Transport::default(),
        Some(Ok(t)) => t,
        Some(Err(_)) => usage(program.as_deref()),
    };

    let config = Config::default();

    let txts = match resolve_txt(&alias, transport, &config).await {
        Ok(txts) => txts,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    match lookup_coin(&txts, &ticker) {
        Ok(c) => println!("{c:#?}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn usage(program: Option<&str>) -> ! {
    eprintln!(
        "usage: {} <alias> <ticker> [system|udp|tcp|doh]",
        program.unwrap_or("oalookup")
    );
    process::exit(1);
}
