use std::path::PathBuf;

use anyhow::{bail, Context};
use automaflow::{prelude::*, store::Store};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::io::{parse_word, print_words, save_derived, to_file_or_stdout};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Automaflow {
    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub verbose: bool,
    /// Turn on debugging information
    #[arg(short, long, global = true)]
    pub debug: bool,
    /// Directory holding the saved automata
    #[arg(long, global = true, env = "AUTOMAFLOW_STORE", default_value = "automates")]
    pub store: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct Bound {
    /// Only words up to this length are considered
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=20))]
    pub max_length: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Creates an empty automaton")]
    New { name: String },
    #[command(about = "Lists the saved automata")]
    List,
    #[command(about = "Prints the transition table of an automaton")]
    Show { name: String },
    #[command(about = "Deletes a saved automaton")]
    Delete { name: String },
    #[command(about = "Adds a symbol to the alphabet, use ε for the empty move")]
    AddSymbol { name: String, symbol: char },
    #[command(about = "Adds a state with a fresh id")]
    AddState {
        name: String,
        label: String,
        #[arg(long)]
        initial: bool,
        #[arg(long = "final")]
        accepting: bool,
    },
    #[command(about = "Adds a transition between two states given by label")]
    AddTransition {
        name: String,
        source: String,
        symbol: char,
        destination: String,
    },
    #[command(about = "Tests whether a word is accepted")]
    Accepts {
        name: String,
        #[arg(default_value = "")]
        word: String,
    },
    #[command(about = "Reports whether an automaton is deterministic, complete and minimal")]
    Check { name: String },
    #[command(about = "Applies the subset construction")]
    Determinize {
        name: String,
        #[arg(long)]
        save_as: Option<String>,
    },
    #[command(about = "Adds a sink state so that every transition is defined")]
    Complete { name: String },
    #[command(about = "Computes the minimal deterministic automaton")]
    Minimize {
        name: String,
        #[arg(long)]
        save_as: Option<String>,
    },
    #[command(about = "Computes an automaton for the complement language")]
    Complement {
        name: String,
        #[arg(long)]
        save_as: Option<String>,
    },
    #[command(about = "Lists the accepted, or rejected, words up to a length")]
    Words {
        name: String,
        #[command(flatten)]
        bound: Bound,
        #[arg(long)]
        rejected: bool,
    },
    #[command(about = "Compares the languages of two automata")]
    Equivalent {
        left: String,
        right: String,
        #[command(flatten)]
        bound: Bound,
        /// Decide equivalence for words of any length
        #[arg(long)]
        exact: bool,
    },
    #[command(about = "Words accepted by either automaton, or their product with --save-as")]
    Union {
        left: String,
        right: String,
        #[command(flatten)]
        bound: Bound,
        #[arg(long)]
        save_as: Option<String>,
    },
    #[command(about = "Words accepted by both automata, or their product with --save-as")]
    Intersection {
        left: String,
        right: String,
        #[command(flatten)]
        bound: Bound,
        #[arg(long)]
        save_as: Option<String>,
    },
    #[command(about = "Outputs the automaton in the graphviz DOT format")]
    Dot {
        name: String,
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn state_id(aut: &Automaton, label: &str) -> anyhow::Result<StateId> {
    aut.state_by_label(label)
        .map(|q| q.id)
        .with_context(|| format!("{} has no state labelled '{label}'", aut.name()))
}

impl Commands {
    pub fn run(self, store: &Store) -> anyhow::Result<()> {
        match self {
            Commands::New { name } => {
                store.create(&Automaton::new(name))?;
            }
            Commands::List => {
                for name in store.list()? {
                    println!("{name}");
                }
            }
            Commands::Show { name } => {
                println!("{}", store.load(&name)?);
            }
            Commands::Delete { name } => {
                store.delete(&name)?;
            }
            Commands::AddSymbol { name, symbol } => {
                let mut aut = store.load(&name)?;
                let id = aut.new_symbol(symbol)?;
                debug!("added '{symbol}' with id {id}");
                store.save(&aut)?;
            }
            Commands::AddState {
                name,
                label,
                initial,
                accepting,
            } => {
                let mut aut = store.load(&name)?;
                if aut.state_by_label(&label).is_some() {
                    bail!("{name} already has a state labelled '{label}'");
                }
                let id = aut.new_state(label, Role::new(initial, accepting))?;
                debug!("added state {id}");
                store.save(&aut)?;
            }
            Commands::AddTransition {
                name,
                source,
                symbol,
                destination,
            } => {
                let mut aut = store.load(&name)?;
                let (p, q) = (state_id(&aut, &source)?, state_id(&aut, &destination)?);
                let id = aut.new_transition(p, symbol, q)?;
                debug!("added transition {id}");
                store.save(&aut)?;
            }
            Commands::Accepts { name, word } => {
                let aut = store.load(&name)?;
                if aut.recognize(&parse_word(&word))? {
                    println!("accepted");
                } else {
                    println!("rejected");
                }
            }
            Commands::Check { name } => {
                let aut = store.load(&name)?;
                println!("deterministic: {}", aut.is_deterministic());
                println!("complete:      {}", aut.is_complete());
                println!("minimal:       {}", aut.is_minimal());
            }
            Commands::Determinize { name, save_as } => {
                let aut = store.load(&name)?;
                if aut.is_deterministic() {
                    info!("{name} is deterministic already");
                }
                save_derived(store, aut.determinize().into_owned(), save_as)?;
            }
            Commands::Complete { name } => {
                let mut aut = store.load(&name)?;
                aut.complete();
                store.save(&aut)?;
                println!("{aut}");
            }
            Commands::Minimize { name, save_as } => {
                let aut = store.load(&name)?;
                save_derived(store, aut.minimize(), save_as)?;
            }
            Commands::Complement { name, save_as } => {
                let aut = store.load(&name)?;
                save_derived(store, aut.complement(), save_as)?;
            }
            Commands::Words {
                name,
                bound,
                rejected,
            } => {
                let aut = store.load(&name)?;
                let n = bound.max_length as usize;
                if rejected {
                    print_words(aut.rejected_words(n));
                } else {
                    print_words(aut.accepted_words(n));
                }
            }
            Commands::Equivalent {
                left,
                right,
                bound,
                exact,
            } => {
                let (left, right) = (store.load(&left)?, store.load(&right)?);
                if exact {
                    match left.distinguishing_word(&right)? {
                        None => println!("equivalent"),
                        Some(word) => println!("not equivalent: \"{word}\" tells them apart"),
                    }
                } else {
                    let (_, explanation) = left.equivalent(&right, bound.max_length as usize);
                    println!("{explanation}");
                }
            }
            Commands::Union {
                left,
                right,
                bound,
                save_as,
            } => {
                let (left, right) = (store.load(&left)?, store.load(&right)?);
                if save_as.is_some() {
                    save_derived(store, left.product_union(&right)?, save_as)?;
                } else {
                    print_words(left.union_words(&right, bound.max_length as usize)?);
                }
            }
            Commands::Intersection {
                left,
                right,
                bound,
                save_as,
            } => {
                let (left, right) = (store.load(&left)?, store.load(&right)?);
                if save_as.is_some() {
                    save_derived(store, left.product_intersection(&right)?, save_as)?;
                } else {
                    print_words(left.intersection_words(&right, bound.max_length as usize)?);
                }
            }
            Commands::Dot { name, output } => {
                let aut = store.load(&name)?;
                to_file_or_stdout(output.as_ref(), &aut.dot_representation())?;
            }
        }
        Ok(())
    }
}
