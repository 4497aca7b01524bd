use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Identity handle for a declared entity. Handles stay valid for the whole
/// compilation even after the scope that declared them is left, because
/// the entity records live in the arena on `Context`, not in the scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub usize);

/// The compile-time record for one declared name.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub ty: Type,
    pub mutable: bool,
    /// Parameter count for functions, None for plain variables.
    pub arity: Option<usize>,
}

#[derive(Debug)]
struct Scope {
    bindings: HashMap<String, EntityId>,
    parent: Option<usize>,
    in_function: bool,
}

/// The scope chain for one compilation. One root scope exists for the
/// lifetime of the compilation and seeds the builtin names; a fresh child
/// scope is entered for every block construct and left when its analysis
/// finishes. A fresh Context must be created per compilation.
#[derive(Debug)]
pub struct Context {
    entities: Vec<Entity>,
    scopes: Vec<Scope>,
    current: usize,
}

impl Context {
    pub fn new() -> Self {
        Context {
            entities: vec![],
            scopes: vec![Scope {
                bindings: HashMap::new(),
                parent: None,
                in_function: false,
            }],
            current: 0,
        }
    }

    /// Records a binding in the current scope. An immutable declaration of
    /// a name that already exists in this scope (outer scopes are fine,
    /// that is shadowing) is a Redeclaration error; mutable declarations
    /// are exempt and simply rebind the name.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        mutable: bool,
        arity: Option<usize>,
        position: &Position,
    ) -> Result<EntityId, Error> {
        if !mutable && self.scopes[self.current].bindings.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::Redeclaration {
                    variable: String::from(name),
                },
                position.clone(),
            ));
        }

        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            name: String::from(name),
            ty,
            mutable,
            arity,
        });
        self.scopes[self.current]
            .bindings
            .insert(String::from(name), id);
        Ok(id)
    }

    /// Resolves a name to its nearest enclosing declaration, or None.
    pub fn resolve(&self, name: &str) -> Option<EntityId> {
        let mut scope = Some(self.current);
        while let Some(index) = scope {
            if let Some(id) = self.scopes[index].bindings.get(name) {
                return Some(*id);
            }
            scope = self.scopes[index].parent;
        }
        None
    }

    pub fn lookup(&self, name: &str, position: &Position) -> Result<EntityId, Error> {
        self.resolve(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnresolvedIdentifier {
                    variable: String::from(name),
                },
                position.clone(),
            )
        })
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    /// Enters a child scope inheriting the in-function flag.
    pub fn child_for_block(&mut self) {
        self.push_scope(self.scopes[self.current].in_function);
    }

    /// Enters a child scope for a function body: the in-function flag is
    /// set from here down.
    pub fn child_for_function(&mut self) {
        self.push_scope(true);
    }

    fn push_scope(&mut self, in_function: bool) {
        self.scopes.push(Scope {
            bindings: HashMap::new(),
            parent: Some(self.current),
            in_function,
        });
        self.current = self.scopes.len() - 1;
    }

    /// Leaves the current scope. The scope is never consulted again; its
    /// entities outlive it in the arena for referent handles.
    pub fn exit(&mut self) {
        self.current = self.scopes[self.current].parent.unwrap_or(0);
    }

    pub fn assert_in_function(&self, position: &Position) -> Result<(), Error> {
        if self.scopes[self.current].in_function {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::ReturnOutsideFunction,
                position.clone(),
            ))
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
