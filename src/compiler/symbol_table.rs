use rustc_hash::FxHashMap;

use super::{error::*, options::Capacity};

/// Offset of the first variable from the base register
pub const FIRST_OFFSET: i64 = 8;
/// Size of a variable slot in bytes
pub const SLOT_SIZE: i64 = 8;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variable {
    pub name: String,
    /// Last value known at compile time
    pub value: i64,
    /// Byte offset from the base register
    pub offset: i64,
    pub declared: bool,
}

/// Variables in declaration order.
///
/// Offsets are handed out once and never reused; nothing is ever removed.
#[derive(Debug)]
pub struct SymbolTable {
    variables: Vec<Variable>,
    index: FxHashMap<String, usize>,
    next_offset: i64,
    max_variables: usize,
}

impl SymbolTable {
    pub fn new(max_variables: usize) -> SymbolTable {
        SymbolTable {
            variables: Vec::new(),
            index: FxHashMap::default(),
            next_offset: FIRST_OFFSET,
            max_variables,
        }
    }

    /// Declare `name` if it is new. An existing variable keeps its offset and value.
    pub fn declare(&mut self, name: &str) -> Result<&mut Variable, Error> {
        let idx = if let Some(idx) = self.index.get(name) {
            *idx
        } else {
            if self.variables.len() >= self.max_variables {
                return Err(Error::CapacityExceeded {
                    what: Capacity::Variables,
                    limit: self.max_variables,
                });
            }

            let idx = self.variables.len();
            self.variables.push(Variable {
                name: name.to_string(),
                value: 0,
                offset: self.next_offset,
                declared: true,
            });
            self.index.insert(name.to_string(), idx);
            self.next_offset += SLOT_SIZE;
            idx
        };
        Ok(&mut self.variables[idx])
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|idx| &self.variables[*idx])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let idx = *self.index.get(name)?;
        Some(&mut self.variables[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_in_declaration_order() {
        let mut table = SymbolTable::default();
        for name in ["a", "b", "c"] {
            table.declare(name).unwrap();
        }
        let offsets: Vec<_> = table.iter().map(|v| (v.name.as_str(), v.offset)).collect();
        assert_eq!(offsets, vec![("a", 8), ("b", 16), ("c", 24)]);
    }

    #[test]
    fn test_redeclare_keeps_record() {
        let mut table = SymbolTable::default();
        table.declare("a").unwrap().value = 42;
        table.declare("b").unwrap();

        let a = table.declare("a").unwrap();
        assert_eq!(a.offset, 8);
        assert_eq!(a.value, 42);
        assert_eq!(table.len(), 2);
        assert_eq!(table.declare("c").unwrap().offset, 24);
    }

    #[test]
    fn test_lookup() {
        let mut table = SymbolTable::default();
        assert!(table.lookup("x").is_none());
        assert!(table.is_empty());

        table.declare("x").unwrap();
        let x = table.lookup("x").unwrap();
        assert!(x.declared);
        assert_eq!(x.value, 0);

        table.lookup_mut("x").unwrap().value = -7;
        assert_eq!(table.lookup("x").unwrap().value, -7);
        assert!(table.lookup_mut("y").is_none());
    }

    #[test]
    fn test_too_many_variables() {
        let mut table = SymbolTable::new(2);
        table.declare("a").unwrap();
        table.declare("b").unwrap();
        assert!(table.declare("a").is_ok());
        assert_eq!(
            table.declare("c").unwrap_err(),
            Error::CapacityExceeded {
                what: Capacity::Variables,
                limit: 2
            }
        );
        assert!(table.lookup("c").is_none());
    }
}
