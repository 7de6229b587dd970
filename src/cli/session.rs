//! Interactive food pyramid session
//!
//! Reads commands line by line and drives an [`OrganismTree`]. Domain failures
//! are reported and the loop continues; only I/O failures end the session.

use std::io::{BufRead, Write};

use tracing::{debug, info, instrument};

use crate::cli::error::{CliError, CliResult, IoResultExt};
use crate::cli::menu::MenuChoice;
use crate::cli::output;
use crate::config::{DisplayStyle, Settings};
use crate::domain::{Diet, FoodWebError, OrganismNode, OrganismTree, PreyKind};
use crate::tree_traits::TreeNodeConvert;

const DIET_PROMPT: &str = "Is the organism an herbivore / a carnivore / an omnivore? (H / C / O):";

pub struct Session<R, W> {
    input: R,
    out: W,
    settings: Settings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, settings: Settings) -> Self {
        Self {
            input,
            out,
            settings,
        }
    }

    /// Consumes the session, returning its writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `Q` or end of input.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        match self.run_loop() {
            Err(CliError::InputClosed) => {
                debug!("input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn run_loop(&mut self) -> CliResult<()> {
        let mut tree = self.build_tree()?;
        info!(
            apex = tree.root().name(),
            removal_match = ?tree.removal_match(),
            "food pyramid created"
        );

        self.print_menu()?;
        loop {
            let answer = self.ask("Enter your choice:")?;
            let Some(choice) = MenuChoice::from_code(&answer) else {
                output::info(&mut self.out, "Invalid choice. Please try again.")
                    .io_context("write output")?;
                continue;
            };
            if choice == MenuChoice::Quit {
                output::info(&mut self.out, "Quitting program...").io_context("write output")?;
                return Ok(());
            }

            match self.dispatch(&mut tree, choice) {
                Ok(()) => {}
                Err(CliError::Domain(e)) => {
                    debug!(?choice, error = %e, "command rejected");
                    output::error(&mut self.out, &e).io_context("write output")?;
                }
                Err(e) => return Err(e),
            }
            writeln!(self.out).io_context("write output")?;
        }
    }

    fn build_tree(&mut self) -> CliResult<OrganismTree> {
        let name = self.ask("What is the name of the apex predator?:")?;
        let diet = loop {
            let answer = self.ask(DIET_PROMPT)?;
            match answer.parse::<Diet>() {
                Ok(Diet::Herbivore) => {
                    output::warning(&mut self.out, "Apex Predator cannot be herbivore. Try again.")
                        .io_context("write output")?;
                }
                Ok(diet) => break diet,
                Err(e) => {
                    output::error(&mut self.out, &e).io_context("write output")?;
                }
            }
        };

        let tree = OrganismTree::new(OrganismNode::with_diet(name, diet))?
            .with_removal_match(self.settings.tree.removal_match());
        output::info(&mut self.out, "Constructing food pyramid. . .").io_context("write output")?;
        Ok(tree)
    }

    fn print_menu(&mut self) -> CliResult<()> {
        output::header(&mut self.out, "Menu:").io_context("write output")?;
        for choice in MenuChoice::ALL {
            output::info(&mut self.out, &choice).io_context("write output")?;
        }
        writeln!(self.out).io_context("write output")
    }

    fn ask_diet(&mut self) -> CliResult<Diet> {
        loop {
            let answer = self.ask(DIET_PROMPT)?;
            match answer.parse::<Diet>() {
                Ok(diet) => return Ok(diet),
                Err(e) => output::error(&mut self.out, &e).io_context("write output")?,
            }
        }
    }

    /// Prompts and reads one line without its terminator.
    fn ask(&mut self, prompt: &str) -> CliResult<String> {
        output::prompt(&mut self.out, prompt).io_context("write prompt")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).io_context("read input")?;
        if read == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    #[instrument(level = "debug", skip(self, tree))]
    fn dispatch(&mut self, tree: &mut OrganismTree, choice: MenuChoice) -> CliResult<()> {
        match choice {
            MenuChoice::AddPlant => {
                tree.check_cursor_accepts(PreyKind::Plant)?;
                let name = self.ask("What is the name of the organism?:")?;
                tree.add_plant_child(&name)?;
                let msg = format!(
                    "{} has successfully been added as prey for the {}",
                    name,
                    tree.cursor().name()
                );
                output::success(&mut self.out, &msg).io_context("write output")
            }
            MenuChoice::AddAnimal => {
                tree.check_cursor_accepts(PreyKind::Animal)?;
                let name = self.ask("What is the name of the organism?:")?;
                if tree.has_prey_named(&name) {
                    return Err(FoodWebError::DuplicateName(name).into());
                }
                let (is_herbivore, is_carnivore) = self.ask_diet()?.flags();
                tree.add_animal_child(&name, is_herbivore, is_carnivore)?;
                let msg = format!(
                    "A(n) {} has successfully been added as prey for the {}",
                    name,
                    tree.cursor().name()
                );
                output::success(&mut self.out, &msg).io_context("write output")
            }
            MenuChoice::RemoveChild => {
                let name = self.ask("What is the name of the organism to be removed?:")?;
                let removed = tree.remove_child(&name)?;
                let msg = format!(
                    "A(n) {} has been successfully removed as prey for the {}!",
                    removed,
                    tree.cursor().name()
                );
                output::success(&mut self.out, &msg).io_context("write output")
            }
            MenuChoice::ListPrey => {
                let prey = tree.list_prey()?;
                output::info(&mut self.out, &prey).io_context("write output")
            }
            MenuChoice::FoodChain => {
                let chain = tree.list_food_chain()?;
                output::info(&mut self.out, &chain).io_context("write output")
            }
            MenuChoice::Pyramid => {
                let rendered = match self.settings.display.style {
                    DisplayStyle::Outline => tree.render_outline(&self.settings.display.indent),
                    DisplayStyle::Tree => tree.to_tree_string().to_string(),
                };
                write!(self.out, "{}", rendered).io_context("write output")
            }
            MenuChoice::ListPlants => {
                output::info(&mut self.out, &tree.list_all_plants()).io_context("write output")
            }
            MenuChoice::ResetCursor => {
                tree.reset_cursor();
                output::success(&mut self.out, "Cursor successfully reset to root!")
                    .io_context("write output")
            }
            MenuChoice::MoveCursor => {
                let name = self.ask("Move to?:")?;
                tree.move_cursor(&name)?;
                let msg = format!("Cursor successfully moved to {}!", tree.cursor().name());
                output::success(&mut self.out, &msg)
                    .io_context("write output")
            }
            MenuChoice::Quit => Ok(()),
        }
    }
}
