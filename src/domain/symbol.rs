/// Cell symbols and their properties.
/// Properties are queried via methods, not stored as flags,
/// so symbol semantics are centralized here.
///
/// ## Legend:
///   'X' = Wall          ' ' = Blank
///   '0' = Fence         'u' = Main character
///   'e' = Enemy         '*' = Reward

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    Wall,
    Blank,
    Fence,
    MainCharacter,
    Enemy,
    Reward,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::Wall,
        Symbol::Blank,
        Symbol::Fence,
        Symbol::MainCharacter,
        Symbol::Enemy,
        Symbol::Reward,
    ];

    /// Single-character form used by the text grid.
    pub fn to_char(self) -> char {
        match self {
            Symbol::Wall => 'X',
            Symbol::Blank => ' ',
            Symbol::Fence => '0',
            Symbol::MainCharacter => 'u',
            Symbol::Enemy => 'e',
            Symbol::Reward => '*',
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|s| s.to_char() == c)
    }

    /// Does this symbol stop anything from moving into its cell?
    pub fn blocks_entry(self) -> bool {
        matches!(self, Symbol::Wall | Symbol::Enemy)
    }

    /// Is this cell eligible for spawning?
    pub fn is_blank(self) -> bool {
        matches!(self, Symbol::Blank)
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::Blank
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_forms_are_distinct_and_parse_back() {
        for s in Symbol::ALL {
            assert_eq!(Symbol::from_char(s.to_char()), Some(s));
        }
        assert_eq!(Symbol::from_char('?'), None);
    }

    #[test]
    fn only_wall_and_enemy_block() {
        let blocking: Vec<Symbol> = Symbol::ALL.into_iter().filter(|s| s.blocks_entry()).collect();
        assert_eq!(blocking, vec![Symbol::Wall, Symbol::Enemy]);
    }

    #[test]
    fn fence_is_not_blank() {
        assert!(Symbol::Blank.is_blank());
        assert!(!Symbol::Fence.is_blank());
    }
}
