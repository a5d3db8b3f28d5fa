mod command;
mod ingest;
mod output;

fn main() -> anyhow::Result<()> {
    command::run()
}
