mod app;
mod logging;
mod persistence;
mod render;

fn main() -> anyhow::Result<()> {
    app::run()
}
