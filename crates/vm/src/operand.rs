//! Operand resolution: turning arguments into values and variable slots.

use ippcode_common::{ArgKind, Argument, DecodeError, Instruction, Value, ValueType, VarRef};

use crate::error::RuntimeError;
use crate::frame::Slot;
use crate::frame_logic::MissingFrame;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    /// The argument at `index`. Arity was checked at load time.
    pub(crate) fn arg(
        &self,
        instr: &'a Instruction,
        index: usize,
    ) -> Result<&'a Argument, RuntimeError> {
        instr.arg(index).ok_or(RuntimeError::MalformedInstruction {
            at: self.at,
            opcode: instr.opcode,
        })
    }

    fn malformed(&self, source: DecodeError) -> RuntimeError {
        RuntimeError::MalformedArgument {
            at: self.at,
            source,
        }
    }

    fn missing_frame(&self, MissingFrame(frame): MissingFrame) -> RuntimeError {
        RuntimeError::MissingFrame { at: self.at, frame }
    }

    fn var_ref<'arg>(&self, arg: &'arg Argument) -> Result<VarRef<'arg>, RuntimeError> {
        arg.var_ref().map_err(|e| self.malformed(e))
    }

    /// The slot a `var` argument names, for reading.
    fn slot(&self, arg: &Argument) -> Result<&Slot, RuntimeError> {
        let var = self.var_ref(arg)?;
        let frame = self
            .frames
            .frame(var.frame)
            .map_err(|e| self.missing_frame(e))?;
        frame
            .slot(var.name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                at: self.at,
                var: var.to_string(),
            })
    }

    /// The slot a `var` argument names, for writing.
    pub(crate) fn slot_mut(&mut self, arg: &Argument) -> Result<&mut Slot, RuntimeError> {
        let at = self.at;
        let var = arg
            .var_ref()
            .map_err(|source| RuntimeError::MalformedArgument { at, source })?;
        let frame = self
            .frames
            .frame_mut(var.frame)
            .map_err(|MissingFrame(frame)| RuntimeError::MissingFrame { at, frame })?;
        frame
            .slot_mut(var.name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                at,
                var: var.to_string(),
            })
    }

    /// Store `value` into the variable `arg` names.
    pub(crate) fn assign(&mut self, arg: &Argument, value: Value) -> Result<(), RuntimeError> {
        *self.slot_mut(arg)? = Some(value);
        Ok(())
    }

    /// Resolve a `symb` argument, tolerating an unassigned variable.
    ///
    /// Returns `Ok(None)` only for a declared variable that has no value.
    pub(crate) fn resolve_maybe(&self, arg: &Argument) -> Result<Option<Value>, RuntimeError> {
        if arg.kind == ArgKind::Var {
            return Ok(self.slot(arg)?.clone());
        }
        arg.literal().map_err(|e| self.malformed(e))
    }

    /// Resolve a `symb` argument to its value, whatever its type.
    pub(crate) fn resolve_any(&self, arg: &Argument) -> Result<Value, RuntimeError> {
        self.resolve_maybe(arg)?
            .ok_or_else(|| RuntimeError::UnassignedVariable {
                at: self.at,
                var: arg.text.clone(),
            })
    }

    /// Resolve a `symb` argument and require its type to be `expected`.
    pub(crate) fn resolve_typed(
        &self,
        arg: &Argument,
        expected: ValueType,
    ) -> Result<Value, RuntimeError> {
        let value = self.resolve_any(arg)?;
        let found = value.value_type();
        if found != expected {
            return Err(RuntimeError::TypeMismatch {
                at: self.at,
                expected,
                found,
            });
        }
        Ok(value)
    }

    pub(crate) fn resolve_int(&self, arg: &Argument) -> Result<i64, RuntimeError> {
        match self.resolve_typed(arg, ValueType::Int)? {
            Value::Int(n) => Ok(n),
            other => Err(self.mismatch(ValueType::Int, &other)),
        }
    }

    pub(crate) fn resolve_bool(&self, arg: &Argument) -> Result<bool, RuntimeError> {
        match self.resolve_typed(arg, ValueType::Bool)? {
            Value::Bool(b) => Ok(b),
            other => Err(self.mismatch(ValueType::Bool, &other)),
        }
    }

    pub(crate) fn resolve_string(&self, arg: &Argument) -> Result<String, RuntimeError> {
        match self.resolve_typed(arg, ValueType::String)? {
            Value::String(s) => Ok(s),
            other => Err(self.mismatch(ValueType::String, &other)),
        }
    }

    pub(crate) fn mismatch(&self, expected: ValueType, found: &Value) -> RuntimeError {
        RuntimeError::TypeMismatch {
            at: self.at,
            expected,
            found: found.value_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::NoInput;
    use ippcode_common::{FrameRole, Program};

    fn with_machine(check: impl FnOnce(&mut Machine<'_>)) {
        let program = Program::default();
        let mut input = NoInput;
        let mut output = Vec::new();
        let mut machine = Machine::new(&program, &mut input, &mut output).unwrap();
        check(&mut machine);
    }

    fn declare(machine: &mut Machine<'_>, name: &str, value: Option<Value>) {
        let frame = machine.frames.frame_mut(FrameRole::Global).unwrap();
        frame.declare(name);
        *frame.slot_mut(name).unwrap() = value;
    }

    #[test]
    fn literal_resolves_directly() {
        with_machine(|m| {
            assert_eq!(m.resolve_any(&Argument::int(4)), Ok(Value::Int(4)));
            assert_eq!(m.resolve_any(&Argument::nil()), Ok(Value::Nil));
        });
    }

    #[test]
    fn variable_resolves_to_its_value() {
        with_machine(|m| {
            declare(m, "x", Some(Value::Bool(true)));
            assert_eq!(
                m.resolve_typed(&Argument::var("GF@x"), ValueType::Bool),
                Ok(Value::Bool(true))
            );
        });
    }

    #[test]
    fn type_assertion_fails_on_mismatch() {
        with_machine(|m| {
            assert_eq!(
                m.resolve_int(&Argument::string("5")),
                Err(RuntimeError::TypeMismatch {
                    at: 0,
                    expected: ValueType::Int,
                    found: ValueType::String
                })
            );
        });
    }

    #[test]
    fn unassigned_variable_is_value_error_but_tolerated_by_maybe() {
        with_machine(|m| {
            declare(m, "u", None);
            let arg = Argument::var("GF@u");
            assert_eq!(m.resolve_maybe(&arg), Ok(None));
            assert!(matches!(
                m.resolve_any(&arg),
                Err(RuntimeError::UnassignedVariable { .. })
            ));
        });
    }

    #[test]
    fn undeclared_variable_is_variable_access_error() {
        with_machine(|m| {
            assert!(matches!(
                m.resolve_any(&Argument::var("GF@nope")),
                Err(RuntimeError::UndefinedVariable { .. })
            ));
        });
    }

    #[test]
    fn absent_frame_is_frame_access_error() {
        with_machine(|m| {
            assert_eq!(
                m.resolve_any(&Argument::var("LF@x")),
                Err(RuntimeError::MissingFrame {
                    at: 0,
                    frame: FrameRole::Local
                })
            );
        });
    }

    #[test]
    fn bad_role_token_is_structural_error() {
        with_machine(|m| {
            assert!(matches!(
                m.resolve_any(&Argument::var("QF@x")),
                Err(RuntimeError::MalformedArgument { .. })
            ));
        });
    }

    #[test]
    fn assign_overwrites_slot() {
        with_machine(|m| {
            declare(m, "x", Some(Value::Int(1)));
            m.assign(&Argument::var("GF@x"), Value::String("s".into()))
                .unwrap();
            assert_eq!(
                m.resolve_any(&Argument::var("GF@x")),
                Ok(Value::String("s".into()))
            );
        });
    }
}
