use super::Generator;
use crate::control::{HasMethods, MethodTable};
use crate::frame::Frame;

/// The null generator. Always silent, registers no methods.
pub struct Silence {
    methods: MethodTable<Self>,
}

impl Silence {
    pub(crate) fn new() -> Self {
        Self {
            methods: MethodTable::new(),
        }
    }
}

impl HasMethods for Silence {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Generator for Silence {
    fn next_frame(&mut self) -> Frame {
        Frame::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Controlled, MethodError};

    #[test]
    fn produces_silence_and_rejects_every_method() {
        let mut silence = Silence::new();
        assert_eq!(silence.next_frame(), Frame::ZERO);

        let err = silence.call_method("SetFrequency", &mut []).unwrap_err();
        assert!(matches!(err, MethodError::NotFound(_)));
    }
}
