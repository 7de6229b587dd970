//! Domain entities: organisms, diets and child slots

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;

use crate::domain::error::{DomainResult, FoodWebError};

/// One of the three prey positions under a predator.
/// Slots are filled strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Left,
    Middle,
    Right,
}

impl Slot {
    /// All slots in fill order.
    pub const ALL: [Slot; 3] = [Slot::Left, Slot::Middle, Slot::Right];

    fn position(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Middle => 1,
            Slot::Right => 2,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Left => "left",
            Slot::Middle => "middle",
            Slot::Right => "right",
        };
        f.write_str(name)
    }
}

/// Plant/animal classification of a prospective prey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreyKind {
    Plant,
    Animal,
}

/// Diet of an animal as chosen by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl Diet {
    /// `(is_herbivore, is_carnivore)` pair for this diet.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Diet::Herbivore => (true, false),
            Diet::Carnivore => (false, true),
            Diet::Omnivore => (true, true),
        }
    }

    /// Inverse of [`Diet::flags`]; an animal that eats nothing has no diet.
    pub fn from_flags(is_herbivore: bool, is_carnivore: bool) -> Option<Self> {
        match (is_herbivore, is_carnivore) {
            (true, false) => Some(Diet::Herbivore),
            (false, true) => Some(Diet::Carnivore),
            (true, true) => Some(Diet::Omnivore),
            (false, false) => None,
        }
    }
}

impl FromStr for Diet {
    type Err = FoodWebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "herbivore" => Ok(Diet::Herbivore),
            "c" | "carnivore" => Ok(Diet::Carnivore),
            "o" | "omnivore" => Ok(Diet::Omnivore),
            _ => Err(FoodWebError::InvalidDiet(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Diet::Herbivore => "herbivore",
            Diet::Carnivore => "carnivore",
            Diet::Omnivore => "omnivore",
        };
        f.write_str(name)
    }
}

/// How a name given by the user is compared against prey names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    Exact,
    #[default]
    IgnoreCase,
}

impl NameMatch {
    pub fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            NameMatch::Exact => candidate == wanted,
            NameMatch::IgnoreCase => candidate.to_lowercase() == wanted.to_lowercase(),
        }
    }
}

/// One organism in the food web.
///
/// Children are arena handles owned by the enclosing tree. A freshly created
/// node is always a leaf; only the tree attaches prey to it.
#[derive(Debug, Clone)]
pub struct OrganismNode {
    name: String,
    is_plant: bool,
    is_herbivore: bool,
    is_carnivore: bool,
    prey: [Option<Index>; 3],
}

impl OrganismNode {
    /// Animal leaf with the given diet flags.
    pub fn animal(name: impl Into<String>, is_herbivore: bool, is_carnivore: bool) -> Self {
        Self {
            name: name.into(),
            is_plant: false,
            is_herbivore,
            is_carnivore,
            prey: [None; 3],
        }
    }

    /// Animal leaf from a [`Diet`].
    pub fn with_diet(name: impl Into<String>, diet: Diet) -> Self {
        let (is_herbivore, is_carnivore) = diet.flags();
        Self::animal(name, is_herbivore, is_carnivore)
    }

    /// Plant leaf; diet flags are always false.
    pub fn plant(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_plant: true,
            is_herbivore: false,
            is_carnivore: false,
            prey: [None; 3],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_plant(&self) -> bool {
        self.is_plant
    }

    pub fn is_herbivore(&self) -> bool {
        self.is_herbivore
    }

    pub fn is_carnivore(&self) -> bool {
        self.is_carnivore
    }

    pub fn kind(&self) -> PreyKind {
        if self.is_plant {
            PreyKind::Plant
        } else {
            PreyKind::Animal
        }
    }

    /// Diet of an animal; `None` for plants and for animals without diet flags.
    pub fn diet(&self) -> Option<Diet> {
        if self.is_plant {
            return None;
        }
        Diet::from_flags(self.is_herbivore, self.is_carnivore)
    }

    pub fn slot(&self, slot: Slot) -> Option<Index> {
        self.prey[slot.position()]
    }

    /// Occupied slots with their handles, in fill order.
    pub fn prey_slots(&self) -> impl DoubleEndedIterator<Item = (Slot, Index)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.slot(slot).map(|idx| (slot, idx)))
    }

    pub fn prey_count(&self) -> usize {
        self.prey.iter().flatten().count()
    }

    pub fn is_full(&self) -> bool {
        self.prey.iter().all(Option::is_some)
    }

    /// Checks whether prey of `kind` could be attached, without mutating.
    ///
    /// Returns the slot the prey would occupy. Checks run in order:
    /// plant predator, diet compatibility, free slot.
    pub fn check_prey_kind(&self, kind: PreyKind) -> DomainResult<Slot> {
        if self.is_plant {
            return Err(FoodWebError::IsPlant);
        }
        let edible = match kind {
            PreyKind::Plant => self.is_herbivore,
            PreyKind::Animal => self.is_carnivore,
        };
        if !edible {
            return Err(FoodWebError::DietMismatch);
        }
        Slot::ALL
            .into_iter()
            .find(|slot| self.slot(*slot).is_none())
            .ok_or(FoodWebError::PositionNotAvailable)
    }

    /// Attaches `prey` (stored at `prey_idx`) in the first free slot.
    pub fn add_prey(&mut self, prey: &OrganismNode, prey_idx: Index) -> DomainResult<Slot> {
        let slot = self.check_prey_kind(prey.kind())?;
        self.prey[slot.position()] = Some(prey_idx);
        Ok(slot)
    }

    /// Detaches the prey in `slot` and shifts later prey left to close the gap.
    pub(crate) fn remove_prey(&mut self, slot: Slot) -> Option<Index> {
        let pos = slot.position();
        let removed = self.prey[pos].take()?;
        self.prey[pos..].rotate_left(1);
        Some(removed)
    }
}

impl fmt::Display for OrganismNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generational_arena::Arena;
    use rstest::rstest;

    fn handles(n: usize) -> Vec<Index> {
        let mut arena = Arena::new();
        (0..n).map(|i| arena.insert(i)).collect()
    }

    #[rstest]
    #[case(Diet::Herbivore, PreyKind::Plant, true)]
    #[case(Diet::Herbivore, PreyKind::Animal, false)]
    #[case(Diet::Carnivore, PreyKind::Plant, false)]
    #[case(Diet::Carnivore, PreyKind::Animal, true)]
    #[case(Diet::Omnivore, PreyKind::Plant, true)]
    #[case(Diet::Omnivore, PreyKind::Animal, true)]
    fn given_predator_diet_when_adding_prey_then_accepts_only_edible_kind(
        #[case] diet: Diet,
        #[case] kind: PreyKind,
        #[case] accepted: bool,
    ) {
        let mut predator = OrganismNode::with_diet("predator", diet);
        let prey = match kind {
            PreyKind::Plant => OrganismNode::plant("prey"),
            PreyKind::Animal => OrganismNode::animal("prey", true, false),
        };
        let idx = handles(1)[0];

        let result = predator.add_prey(&prey, idx);

        if accepted {
            assert_eq!(result, Ok(Slot::Left));
            assert_eq!(predator.slot(Slot::Left), Some(idx));
        } else {
            assert_eq!(result, Err(FoodWebError::DietMismatch));
            assert_eq!(predator.prey_count(), 0);
        }
    }

    #[test]
    fn given_plant_when_adding_prey_then_fails_with_is_plant() {
        let mut plant = OrganismNode::plant("grass");
        let prey = OrganismNode::plant("moss");

        let result = plant.add_prey(&prey, handles(1)[0]);

        assert_eq!(result, Err(FoodWebError::IsPlant));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn given_n_additions_when_inspecting_slots_then_first_n_are_filled(#[case] n: usize) {
        let mut predator = OrganismNode::with_diet("bear", Diet::Omnivore);
        let idx = handles(n);

        for (i, h) in idx.iter().enumerate() {
            let prey = OrganismNode::plant(format!("p{i}"));
            predator.add_prey(&prey, *h).unwrap();
        }

        for (i, slot) in Slot::ALL.into_iter().enumerate() {
            assert_eq!(predator.slot(slot).is_some(), i < n, "slot {slot}");
        }
        assert_eq!(predator.is_full(), n == 3);
    }

    #[test]
    fn given_full_predator_when_adding_prey_then_fails_with_position_not_available() {
        let mut predator = OrganismNode::with_diet("bear", Diet::Omnivore);
        let idx = handles(4);
        for h in &idx[..3] {
            predator.add_prey(&OrganismNode::plant("p"), *h).unwrap();
        }

        let result = predator.add_prey(&OrganismNode::plant("extra"), idx[3]);

        assert_eq!(result, Err(FoodWebError::PositionNotAvailable));
        assert!(predator.prey_slots().all(|(_, h)| h != idx[3]));
    }

    #[test]
    fn given_diet_mismatch_and_full_when_checking_then_diet_is_reported_first() {
        let mut predator = OrganismNode::with_diet("cow", Diet::Herbivore);
        for h in handles(3) {
            predator.add_prey(&OrganismNode::plant("p"), h).unwrap();
        }

        assert_eq!(
            predator.check_prey_kind(PreyKind::Animal),
            Err(FoodWebError::DietMismatch)
        );
    }

    #[test]
    fn given_three_prey_when_removing_first_then_remaining_shift_left() {
        let mut predator = OrganismNode::with_diet("bear", Diet::Omnivore);
        let idx = handles(3);
        for h in &idx {
            predator.add_prey(&OrganismNode::plant("p"), *h).unwrap();
        }

        let removed = predator.remove_prey(Slot::Left);

        assert_eq!(removed, Some(idx[0]));
        assert_eq!(predator.slot(Slot::Left), Some(idx[1]));
        assert_eq!(predator.slot(Slot::Middle), Some(idx[2]));
        assert_eq!(predator.slot(Slot::Right), None);
    }

    #[rstest]
    #[case("H", Diet::Herbivore)]
    #[case(" c ", Diet::Carnivore)]
    #[case("o", Diet::Omnivore)]
    #[case("Omnivore", Diet::Omnivore)]
    fn given_diet_choice_when_parsing_then_maps_to_diet(#[case] input: &str, #[case] diet: Diet) {
        assert_eq!(input.parse::<Diet>(), Ok(diet));
    }

    #[test]
    fn given_unknown_diet_choice_when_parsing_then_fails() {
        assert_eq!(
            "x".parse::<Diet>(),
            Err(FoodWebError::InvalidDiet("x".to_string()))
        );
    }

    #[test]
    fn given_plant_when_reading_diet_then_none() {
        assert_eq!(OrganismNode::plant("fern").diet(), None);
        assert_eq!(
            OrganismNode::animal("lion", false, true).diet(),
            Some(Diet::Carnivore)
        );
    }

    #[test]
    fn given_ignore_case_policy_when_matching_then_case_is_folded() {
        assert!(NameMatch::IgnoreCase.matches("Zebra", "zEBRA"));
        assert!(!NameMatch::Exact.matches("Zebra", "zebra"));
    }
}
