//! Chain-agnostic transaction description and its append-only builder.
//!
//! A [`TransactionSpec`] is an ordered list of commands plus the inputs they
//! reference. Commands address their operands through [`Argument`] handles,
//! which are only valid inside the builder that produced them:
//!
//! ```text
//! inputs:   [Pure(0xdeployer)]
//! commands: [Publish{..}        -> Result(0)
//!            TransferObjects([Result(0)], Input(0))]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};
use crate::types::{Address, CompiledPackage, ObjectId};

// ============================================================================
// Operands
// ============================================================================

/// Literal value passed by value to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PureValue {
    Address(Address),
    U64(u64),
    /// `vector<address>`
    Addresses(Vec<Address>),
    /// `vector<String>`
    Strings(Vec<String>),
}

/// Transaction input slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Pure(PureValue),
    /// Existing on-chain object, resolved to an owned or shared reference at
    /// submission time
    Object(ObjectId),
}

/// Handle to an input or to the result of an earlier command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    Input(u16),
    Result(u16),
}

/// Fully qualified Move function, `<package>::<module>::<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(package: ObjectId, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package,
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

impl FromStr for MoveTarget {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [package, module, function]
                if !package.is_empty() && !module.is_empty() && !function.is_empty() =>
            {
                Ok(Self::new(ObjectId::new(*package), *module, *function))
            }
            _ => Err(DeployError::InvalidArgument(format!(
                "Invalid Move call target '{}': expected <package>::<module>::<function>",
                s
            ))),
        }
    }
}

/// A single on-chain operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Publish a package; yields its upgrade capability
    Publish {
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    },

    /// Transfer objects to the address held in `recipient`
    TransferObjects {
        objects: Vec<Argument>,
        recipient: Argument,
    },

    /// Call a Move function
    MoveCall {
        target: MoveTarget,
        arguments: Vec<Argument>,
    },
}

// ============================================================================
// TransactionSpec
// ============================================================================

/// Immutable, unsigned transaction description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSpec {
    inputs: Vec<Input>,
    commands: Vec<Command>,
}

impl TransactionSpec {
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up the input behind an `Argument::Input` handle.
    pub fn input(&self, argument: Argument) -> Option<&Input> {
        match argument {
            Argument::Input(index) => self.inputs.get(index as usize),
            Argument::Result(_) => None,
        }
    }

    /// First Move call in the transaction, if any.
    pub fn move_call(&self) -> Option<(&MoveTarget, &[Argument])> {
        self.commands.iter().find_map(|command| match command {
            Command::MoveCall { target, arguments } => Some((target, arguments.as_slice())),
            _ => None,
        })
    }
}

// ============================================================================
// TransactionBuilder
// ============================================================================

/// Append-only builder for [`TransactionSpec`].
///
/// Operations may only consume results of commands that were appended
/// before them.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<Input>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal input.
    pub fn pure(&mut self, value: PureValue) -> Result<Argument> {
        self.push_input(Input::Pure(value))
    }

    /// Add an object reference input.
    pub fn object(&mut self, object_id: ObjectId) -> Result<Argument> {
        self.push_input(Input::Object(object_id))
    }

    /// Publish a package. Returns the upgrade-capability handle.
    pub fn publish(&mut self, package: CompiledPackage) -> Result<Argument> {
        self.push_command(Command::Publish {
            modules: package.modules,
            dependencies: package.dependencies,
        })
    }

    /// Transfer `objects` to the address passed as `recipient`.
    pub fn transfer_objects(&mut self, objects: Vec<Argument>, recipient: Argument) -> Result<()> {
        if objects.is_empty() {
            return Err(DeployError::InvalidArgument(
                "transferObjects requires at least one object".to_string(),
            ));
        }
        for argument in objects.iter().chain(std::iter::once(&recipient)) {
            self.check(*argument)?;
        }

        self.push_command(Command::TransferObjects { objects, recipient })?;
        Ok(())
    }

    /// Call a Move function. Returns the call's result handle.
    pub fn move_call(&mut self, target: MoveTarget, arguments: Vec<Argument>) -> Result<Argument> {
        for argument in &arguments {
            self.check(*argument)?;
        }

        self.push_command(Command::MoveCall { target, arguments })
    }

    pub fn finish(self) -> TransactionSpec {
        TransactionSpec {
            inputs: self.inputs,
            commands: self.commands,
        }
    }

    fn push_input(&mut self, input: Input) -> Result<Argument> {
        let index = next_index(self.inputs.len(), "inputs")?;
        self.inputs.push(input);
        Ok(Argument::Input(index))
    }

    fn push_command(&mut self, command: Command) -> Result<Argument> {
        let index = next_index(self.commands.len(), "commands")?;
        self.commands.push(command);
        Ok(Argument::Result(index))
    }

    fn check(&self, argument: Argument) -> Result<()> {
        match argument {
            Argument::Input(index) if (index as usize) < self.inputs.len() => Ok(()),
            Argument::Result(index) if (index as usize) < self.commands.len() => Ok(()),
            Argument::Input(index) => Err(DeployError::InvalidArgument(format!(
                "Input {} has not been added to this transaction",
                index
            ))),
            Argument::Result(index) => Err(DeployError::InvalidArgument(format!(
                "Result {} is not produced by an earlier command",
                index
            ))),
        }
    }
}

/// Handle index for the next slot; handles are `u16` and never wrap.
fn next_index(len: usize, slot: &str) -> Result<u16> {
    u16::try_from(len).map_err(|_| {
        DeployError::InvalidArgument(format!(
            "Transaction cannot hold more than {} {}",
            u16::MAX as usize + 1,
            slot
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> CompiledPackage {
        CompiledPackage {
            modules: vec![vec![1, 2, 3]],
            dependencies: vec![ObjectId::new("0x1"), ObjectId::new("0x2")],
        }
    }

    #[test]
    fn test_publish_then_transfer() {
        let mut builder = TransactionBuilder::new();
        let cap = builder.publish(package()).unwrap();
        let recipient = builder
            .pure(PureValue::Address(Address::new("0xa11ce")))
            .unwrap();
        builder.transfer_objects(vec![cap], recipient).unwrap();

        let spec = builder.finish();
        assert_eq!(cap, Argument::Result(0));
        assert_eq!(spec.commands().len(), 2);
        assert_eq!(
            spec.commands()[1],
            Command::TransferObjects {
                objects: vec![Argument::Result(0)],
                recipient: Argument::Input(0),
            }
        );
        assert_eq!(
            spec.input(recipient),
            Some(&Input::Pure(PureValue::Address(Address::new("0xa11ce"))))
        );
    }

    #[test]
    fn test_rejects_result_not_yet_produced() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder
            .pure(PureValue::Address(Address::new("0xa11ce")))
            .unwrap();

        let err = builder
            .transfer_objects(vec![Argument::Result(0)], recipient)
            .unwrap_err();
        assert!(matches!(err, DeployError::InvalidArgument(_)));

        // Handle from another builder
        let target = MoveTarget::new(ObjectId::new("0xP"), "m", "f");
        let err = builder.move_call(target, vec![Argument::Input(7)]).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArgument(_)));

        assert!(builder.finish().commands().is_empty());
    }

    #[test]
    fn test_rejects_empty_transfer() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder
            .pure(PureValue::Address(Address::new("0xa11ce")))
            .unwrap();
        assert!(builder.transfer_objects(vec![], recipient).is_err());
    }

    #[test]
    fn test_handle_indices_never_wrap() {
        let mut builder = TransactionBuilder::new();
        for n in 0..=u16::MAX {
            assert_eq!(builder.pure(PureValue::U64(n as u64)).unwrap(), Argument::Input(n));
        }
        let err = builder.pure(PureValue::U64(0)).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArgument(_)));
        assert!(builder.object(ObjectId::new("0xa")).is_err());

        for n in 0..=u16::MAX {
            let empty = CompiledPackage {
                modules: vec![],
                dependencies: vec![],
            };
            assert_eq!(builder.publish(empty).unwrap(), Argument::Result(n));
        }
        let target = MoveTarget::new(ObjectId::new("0xP"), "m", "f");
        let err = builder.move_call(target, vec![Argument::Input(0)]).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArgument(_)));

        let spec = builder.finish();
        assert_eq!(spec.inputs().len(), u16::MAX as usize + 1);
        assert_eq!(spec.commands().len(), u16::MAX as usize + 1);
    }

    #[test]
    fn test_move_target_parsing() {
        let target: MoveTarget = "0xP::event_registry::update_config".parse().unwrap();
        assert_eq!(target.package, ObjectId::new("0xP"));
        assert_eq!(target.module, "event_registry");
        assert_eq!(target.function, "update_config");
        assert_eq!(target.to_string(), "0xP::event_registry::update_config");

        assert!("0xP::event_registry".parse::<MoveTarget>().is_err());
        assert!("0xP::::f".parse::<MoveTarget>().is_err());
    }
}
