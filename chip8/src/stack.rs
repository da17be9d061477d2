//! Call stack.
use crate::constants::Address;

/// Stack of return pointers used for jumping when a routine call finishes.
pub struct AddressStack {
    stack: Box<[Address]>,
    /// Stack pointer, the number of addresses on the stack.
    sp: usize,
}

/// The stack has no room for another address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOverflow;

/// There is no address on the stack to return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUnderflow;

impl AddressStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: vec![0; capacity].into_boxed_slice(),
            sp: 0,
        }
    }

    pub fn reset(&mut self) {
        self.stack.fill(0);
        self.sp = 0;
    }

    #[inline]
    pub fn push(&mut self, addr: Address) -> Result<(), StackOverflow> {
        let slot = self.stack.get_mut(self.sp).ok_or(StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Address, StackUnderflow> {
        let sp = self.sp.checked_sub(1).ok_or(StackUnderflow)?;
        self.sp = sp;
        Ok(self.stack[sp])
    }

    /// Number of return addresses currently on the stack.
    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn capacity(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Return addresses, bottom of the stack first.
    pub fn as_slice(&self) -> &[Address] {
        &self.stack[..self.sp]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lifo() {
        let mut stack = AddressStack::new(4);
        stack.push(0x200).unwrap();
        stack.push(0x300).unwrap();
        stack.push(0x400).unwrap();
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.as_slice(), &[0x200, 0x300, 0x400]);

        assert_eq!(stack.pop(), Ok(0x400));
        assert_eq!(stack.pop(), Ok(0x300));
        assert_eq!(stack.pop(), Ok(0x200));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_overflow() {
        let mut stack = AddressStack::new(2);
        assert_eq!(stack.push(1), Ok(()));
        assert_eq!(stack.push(2), Ok(()));
        assert_eq!(stack.push(3), Err(StackOverflow));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Ok(2));
    }

    #[test]
    fn test_underflow() {
        let mut stack = AddressStack::new(16);
        assert_eq!(stack.pop(), Err(StackUnderflow));

        stack.push(0x222).unwrap();
        stack.reset();
        assert_eq!(stack.pop(), Err(StackUnderflow));
    }
}
