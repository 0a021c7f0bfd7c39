use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use lazy_static::lazy_static;

/// An interned symbolic constant. Atoms double as functor names, so two
/// atoms compare equal iff they were interned from the same name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

struct SymbolTable {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, u32>,
}

impl SymbolTable {
    fn with_well_known() -> Self {
        let mut table = SymbolTable {
            names: Vec::new(),
            ids: HashMap::new(),
        };
        for name in WELL_KNOWN {
            table.intern(name);
        }
        table
    }

    fn intern(&mut self, name: &str) -> u32 {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        assert!(
            self.names.len() < u32::MAX as usize,
            "symbol table cannot hold more than u32::MAX atoms"
        );
        let id = self.names.len() as u32;
        let name: Arc<str> = Arc::from(name);
        self.names.push(name.clone());
        self.ids.insert(name, id);
        id
    }
}

lazy_static! {
    /// Process wide symbol table. Only ever grows, so a poisoned lock
    /// still guards a consistent table.
    static ref SYMBOLS: RwLock<SymbolTable> = RwLock::new(SymbolTable::with_well_known());
}

macro_rules! well_known_atoms {
    [$($konst:ident => $name:expr),*$(,)?] => {
        const WELL_KNOWN: &[&str] = &[$($name),*];

        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        enum WellKnown {
            $($konst),*
        }

        impl Atom {
            $(pub const $konst: Atom = Atom(WellKnown::$konst as u32);)*
        }
    };
}

well_known_atoms![
    // Lists
    NIL => "[]",
    DOT => ".",
    // Control
    COMMA => ",",
    SEMICOLON => ";",
    CUT => "!",
    TRUE => "true",
    FAIL => "fail",
    // Arithmetic
    PLUS => "+",
    MINUS => "-",
    STAR => "*",
    INT_DIV => "//",
    MOD => "mod",
    MIN => "min",
    MAX => "max",
    ABS => "abs",
    IS => "is",
    ARITH_EQ => "=:=",
    ARITH_NE => "=\\=",
    LESS => "<",
    LESS_EQ => "=<",
    GREATER => ">",
    GREATER_EQ => ">=",
    // Unification
    UNIFY => "=",
    NOT_UNIFY => "\\=",
    // Type tests
    ATOM => "atom",
    INTEGER => "integer",
    VAR => "var",
    NONVAR => "nonvar",
    COMPOUND => "compound",
    CALLABLE => "callable",
    // Library
    MEMBER => "member",
];

impl Atom {
    pub fn new(name: &str) -> Atom {
        {
            let table = SYMBOLS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(id) = table.ids.get(name) {
                return Atom(*id);
            }
        }
        let mut table = SYMBOLS.write().unwrap_or_else(PoisonError::into_inner);
        Atom(table.intern(name))
    }

    pub fn name(&self) -> Arc<str> {
        let table = SYMBOLS.read().unwrap_or_else(PoisonError::into_inner);
        table.names[self.0 as usize].clone()
    }

    /// Whether the atom has to be written between single quotes to be read
    /// back as the same atom.
    fn needs_quotes(name: &str) -> bool {
        const SYMBOL_CHARS: &str = "+-*/\\^<>=~:.?@#&$";
        if matches!(name, "[]" | "!" | ";" | "{}") {
            return false;
        }
        let mut chars = name.chars();
        match chars.next() {
            None => true,
            Some(c) if c.is_ascii_lowercase() => {
                !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            Some(_) => !name.chars().all(|c| SYMBOL_CHARS.contains(c)),
        }
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Atom::new(name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        if Atom::needs_quotes(&name) {
            write!(f, "'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
        } else {
            f.write_str(&name)
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self)
    }
}
