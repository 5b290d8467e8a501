use crate::diagnostics::Fault;

/// The one stack every pointer pushes to and pops from. Starts as `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedStack {
    items: Vec<Option<i64>>,
}

impl Default for SharedStack {
    fn default() -> Self {
        SharedStack {
            items: vec![Some(0)],
        }
    }
}

impl SharedStack {
    pub fn push(&mut self, value: Option<i64>) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<Option<i64>, Fault> {
        self.items.pop().ok_or(Fault::StackUnderflow)
    }

    /// Pops an arithmetic operand; an unset entry is as fatal as an unset register.
    pub fn pop_operand(&mut self) -> Result<i64, Fault> {
        self.pop()?.ok_or(Fault::UninitializedRegister)
    }

    pub fn peek(&self) -> Option<Option<i64>> {
        self.items.last().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[Option<i64>] {
        &self.items
    }
}
