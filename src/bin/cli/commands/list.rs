use anyhow::Result;

use cram::study::Material;

use crate::app::App;

pub fn run(app: &App) -> Result<()> {
    let names = app.store.list()?;
    if names.is_empty() {
        println!(
            "No semesters stored in {}. Create one with 'new'.",
            app.store.data_dir().display()
        );
        return Ok(());
    }

    for name in names {
        match app.store.read(&name) {
            Ok(semester) => println!(
                "{}  ({} courses, {} cards)",
                name,
                semester.len(),
                semester.count_cards()
            ),
            Err(err) => {
                log::warn!("could not read semester {}: {}", name, err);
                println!("{}  (unreadable)", name);
            }
        }
    }

    Ok(())
}
