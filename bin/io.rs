use automaflow::{alphabet::EPSILON, store::Store, Automaton};
use tracing::debug;

pub fn to_file_or_stdout(maybe_file_name: Option<&String>, output: &str) -> anyhow::Result<()> {
    if let Some(file_name) = maybe_file_name {
        debug!("Output file name specified: {:?}", file_name);
        std::fs::write(file_name, output)?;
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Reads a word as printed by [`print_words`], so a lone ε is the empty word.
pub fn parse_word(text: &str) -> String {
    if text == EPSILON.to_string() {
        String::new()
    } else {
        text.to_string()
    }
}

/// Prints one word per line, the empty word as ε.
pub fn print_words<I: IntoIterator<Item = String>>(words: I) {
    for word in words {
        if word.is_empty() {
            println!("ε");
        } else {
            println!("{word}");
        }
    }
}

/// Prints the result of a construction and, when a name is given, saves it under that name.
pub fn save_derived(
    store: &Store,
    mut aut: Automaton,
    save_as: Option<String>,
) -> anyhow::Result<()> {
    println!("{aut}");
    if let Some(name) = save_as {
        aut.set_name(name);
        store.create(&aut)?;
    }
    Ok(())
}
