//! Menu of the interactive session

use std::fmt;

/// One entry of the food pyramid menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddPlant,
    AddAnimal,
    RemoveChild,
    ListPrey,
    FoodChain,
    Pyramid,
    ListPlants,
    ResetCursor,
    MoveCursor,
    Quit,
}

impl MenuChoice {
    /// Menu order as displayed.
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::AddPlant,
        MenuChoice::AddAnimal,
        MenuChoice::RemoveChild,
        MenuChoice::ListPrey,
        MenuChoice::FoodChain,
        MenuChoice::Pyramid,
        MenuChoice::ListPlants,
        MenuChoice::ResetCursor,
        MenuChoice::MoveCursor,
        MenuChoice::Quit,
    ];

    pub fn code(self) -> &'static str {
        match self {
            MenuChoice::AddPlant => "PC",
            MenuChoice::AddAnimal => "AC",
            MenuChoice::RemoveChild => "RC",
            MenuChoice::ListPrey => "P",
            MenuChoice::FoodChain => "C",
            MenuChoice::Pyramid => "F",
            MenuChoice::ListPlants => "LP",
            MenuChoice::ResetCursor => "R",
            MenuChoice::MoveCursor => "M",
            MenuChoice::Quit => "Q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuChoice::AddPlant => "Create New Plant Child",
            MenuChoice::AddAnimal => "Create New Animal Child",
            MenuChoice::RemoveChild => "Remove Child",
            MenuChoice::ListPrey => "Print Out Cursor's Prey",
            MenuChoice::FoodChain => "Print Out Food Chain",
            MenuChoice::Pyramid => "Print Out Food Pyramid at Cursor",
            MenuChoice::ListPlants => "List All Plants Supporting Cursor",
            MenuChoice::ResetCursor => "Reset Cursor to Root",
            MenuChoice::MoveCursor => "Move Cursor to Child",
            MenuChoice::Quit => "Quit",
        }
    }

    /// Case-insensitive lookup by menu code.
    pub fn from_code(input: &str) -> Option<Self> {
        let wanted = input.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.code().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5}- {}", format!("({})", self.code()), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pc", MenuChoice::AddPlant)]
    #[case(" AC ", MenuChoice::AddAnimal)]
    #[case("Lp", MenuChoice::ListPlants)]
    #[case("q", MenuChoice::Quit)]
    fn given_code_when_looking_up_then_ignores_case(#[case] input: &str, #[case] expected: MenuChoice) {
        assert_eq!(MenuChoice::from_code(input), Some(expected));
    }

    #[test]
    fn given_unknown_code_when_looking_up_then_none() {
        assert_eq!(MenuChoice::from_code("X"), None);
        assert_eq!(MenuChoice::from_code(""), None);
    }

    #[test]
    fn given_choice_when_displaying_then_aligns_code_column() {
        assert_eq!(MenuChoice::ListPrey.to_string(), "(P)  - Print Out Cursor's Prey");
        assert_eq!(MenuChoice::AddPlant.to_string(), "(PC) - Create New Plant Child");
    }
}
