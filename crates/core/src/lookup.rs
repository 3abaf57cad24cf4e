/// Source of addresses for an entity whose remarks were cut off.
///
/// Implementations absorb their own failures: a lookup that cannot reach
/// its backend returns an empty list and logs why.
pub trait AddressLookup {
    fn lookup_addresses(&self, name: &str) -> Vec<String>;
}

/// Lookup that never finds anything. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl AddressLookup for NoLookup {
    fn lookup_addresses(&self, _name: &str) -> Vec<String> {
        Vec::new()
    }
}

impl<L: AddressLookup + ?Sized> AddressLookup for &L {
    fn lookup_addresses(&self, name: &str) -> Vec<String> {
        (**self).lookup_addresses(name)
    }
}

impl<L: AddressLookup + ?Sized> AddressLookup for Box<L> {
    fn lookup_addresses(&self, name: &str) -> Vec<String> {
        (**self).lookup_addresses(name)
    }
}
