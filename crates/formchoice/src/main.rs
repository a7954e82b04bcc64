fn main() -> anyhow::Result<()> {
    formchoice::init();

    let mut app = formchoice::ui::app::CliApp;
    app.run()
}
