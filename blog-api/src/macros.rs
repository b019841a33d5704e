/// Builder-style setters for optional request body fields.
///
/// `setter!(opt body.title: String)` wraps the value in `Some` so the field
/// is only serialized once it has been set.
macro_rules! setter {
    (opt $field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = ::std::option::Option::Some($subfield.into());
            self
        }
    };
}

pub(crate) use setter;
