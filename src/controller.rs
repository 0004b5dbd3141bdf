//! Query, verify and commit a single fuse
//!
//! Fuses are written at most once: every bit which is set is permanent.
//! [FuseController::commit] therefore inspects the current state first and
//! only ever programs an unfused value, or completes a value whose lock was
//! never programmed.

use log::{debug, info, warn};

use crate::{
    codec::extract_field,
    error::Error,
    fuse::{DesiredValue, FuseDescriptor, ProgrammedState},
    store::FuseStore,
    targets::ocotp::BitField,
};

/// Result of a successful [FuseController::commit]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The fuse already held the requested value, nothing was written
    AlreadyProgrammed,
    /// The requested value was written
    Programmed,
}

/// Fuse contents read from the store
struct Snapshot {
    /// Masked words of the value fields
    words: Vec<u32>,
    /// Masked lock bits, if the fuse has a lock
    lock: Option<u32>,
    state: ProgrammedState,
}

impl Snapshot {
    fn lock_engaged(&self) -> bool {
        self.lock.is_some_and(|bits| bits != 0)
    }
}

/// Drives a [FuseDescriptor] against a [FuseStore]
pub struct FuseController<'a> {
    descriptor: &'a FuseDescriptor,
    store: &'a mut dyn FuseStore,
}

impl<'a> FuseController<'a> {
    pub fn new(descriptor: &'a FuseDescriptor, store: &'a mut dyn FuseStore) -> Self {
        Self { descriptor, store }
    }

    /// Read and decode the current state of the fuse
    pub fn query(&mut self) -> Result<ProgrammedState, Error> {
        Ok(self.inspect()?.state)
    }

    /// Check that the fuse holds `desired`, never writing anything
    pub fn verify(&mut self, desired: &DesiredValue) -> Result<(), Error> {
        match self.inspect()?.state {
            ProgrammedState::Unfused if desired.is_blank() => Ok(()),
            ProgrammedState::Fused(value) if value == desired.value => Ok(()),
            ProgrammedState::Unfused => Err(self.not_programmed()),
            ProgrammedState::Unsealed(value) if value == desired.value => {
                warn!("{} holds the requested value but is not locked", self.descriptor.name);
                Err(self.not_programmed())
            }
            ProgrammedState::Fused(value) | ProgrammedState::Unsealed(value) => {
                Err(Error::Mismatch {
                    fuse: self.descriptor.name.to_string(),
                    fused: value.to_string(),
                    requested: desired.value.to_string(),
                })
            }
        }
    }

    /// Program `desired` unless the fuse already holds it
    ///
    /// Nothing is written when the fuse holds a different value or its lock
    /// is engaged without a value.
    pub fn commit(&mut self, desired: &DesiredValue) -> Result<CommitOutcome, Error> {
        let snapshot = self.inspect()?;
        let locked = snapshot.lock_engaged();

        match snapshot.state {
            ProgrammedState::Fused(ref value) if *value == desired.value => {
                info!("{} is already programmed", self.descriptor.name);
                Ok(CommitOutcome::AlreadyProgrammed)
            }
            ProgrammedState::Fused(value) => Err(self.conflict(value.to_string(), desired)),
            ProgrammedState::Unsealed(ref value) if desired.covers(&snapshot.words) => {
                info!(
                    "{} holds {value} but is not locked, resuming an interrupted commit",
                    self.descriptor.name
                );
                self.program(desired)?;
                Ok(CommitOutcome::Programmed)
            }
            ProgrammedState::Unsealed(value) => Err(self.conflict(value.to_string(), desired)),
            ProgrammedState::Unfused if locked => Err(Error::Locked {
                fuse: self.descriptor.name.to_string(),
            }),
            ProgrammedState::Unfused if desired.is_blank() => {
                info!(
                    "{} is unprogrammed, which already reads as {}",
                    self.descriptor.name, desired.value
                );
                Ok(CommitOutcome::AlreadyProgrammed)
            }
            ProgrammedState::Unfused => {
                self.program(desired)?;
                Ok(CommitOutcome::Programmed)
            }
        }
    }

    fn inspect(&mut self) -> Result<Snapshot, Error> {
        let words = self
            .descriptor
            .fields()
            .iter()
            .map(|field| self.read_field(field))
            .collect::<Result<Vec<_>, _>>()?;

        let lock = match self.descriptor.lock {
            Some(lock) => Some(self.read_field(&lock)?),
            None => None,
        };

        let state = match (self.descriptor.decode(&words), self.descriptor.lock) {
            (None, _) => ProgrammedState::Unfused,
            (Some(value), Some(field)) if lock != Some(field.mask) => {
                ProgrammedState::Unsealed(value)
            }
            (Some(value), _) => ProgrammedState::Fused(value),
        };

        debug!("{} state: {state}", self.descriptor.name);

        Ok(Snapshot { words, lock, state })
    }

    /// Value fields first, the lock last
    fn program(&mut self, desired: &DesiredValue) -> Result<(), Error> {
        info!("Programming {} to {}", self.descriptor.name, desired.value);

        for (field, bits) in desired.writes() {
            self.program_field(field, *bits)?;
        }

        if let Some(lock) = self.descriptor.lock {
            info!("Locking {}", self.descriptor.name);
            self.program_field(&lock, lock.mask)?;
        }

        Ok(())
    }

    fn program_field(&mut self, field: &BitField, bits: u32) -> Result<(), Error> {
        let current = self.store.read_register(&field.register)?;
        let value = current | bits;

        if value == current {
            debug!("{field} already holds {bits:#010x}, skipping");
            return Ok(());
        }

        debug!("Writing {value:#010x} to {}", field.register);
        self.store.write_register(&field.register, value)?;

        Ok(())
    }

    fn read_field(&mut self, field: &BitField) -> Result<u32, Error> {
        let word = self.store.read_register(&field.register)?;
        debug!("Read {word:#010x} from {}", field.register);

        Ok(extract_field(word, field.mask))
    }

    fn not_programmed(&self) -> Error {
        Error::NotProgrammed {
            fuse: self.descriptor.name.to_string(),
        }
    }

    fn conflict(&self, fused: String, desired: &DesiredValue) -> Error {
        Error::Conflict {
            fuse: self.descriptor.name.to_string(),
            fused,
            requested: desired.value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        fuse::FuseValue,
        store::MemoryStore,
        targets::{ocotp, Chip},
    };

    const LOCK: ocotp::Register = ocotp::imx6::HW_OCOTP_LOCK;
    const MAC0: ocotp::Register = ocotp::imx6::HW_OCOTP_MAC0;
    const MAC1: ocotp::Register = ocotp::imx6::HW_OCOTP_MAC1;
    const CFG5: ocotp::Register = ocotp::imx6::HW_OCOTP_CFG5;

    fn fuse(chip: Chip, name: &str) -> &'static FuseDescriptor {
        chip.find_fuse(name).unwrap()
    }

    fn desired(fuse: &FuseDescriptor, value: &str) -> DesiredValue {
        fuse.parse_value(Some(value)).unwrap()
    }

    #[test]
    fn test_commit_mac() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new();

        let outcome = FuseController::new(mac, &mut store)
            .commit(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();

        assert_eq!(outcome, CommitOutcome::Programmed);
        assert_eq!(
            store.writes(),
            &[(MAC0, 0x2233_4455), (MAC1, 0x0000_0011), (LOCK, 0x0000_0300)]
        );
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mac = fuse(Chip::Imx6, "MAC");
        let value = desired(mac, "00:11:22:33:44:55");
        let mut store = MemoryStore::new();

        FuseController::new(mac, &mut store).commit(&value).unwrap();
        let writes = store.writes().len();

        let outcome = FuseController::new(mac, &mut store).commit(&value).unwrap();
        assert_eq!(outcome, CommitOutcome::AlreadyProgrammed);
        assert_eq!(store.writes().len(), writes);
    }

    #[test]
    fn test_commit_conflict() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new()
            .with_register(MAC0, 0xff33_4455)
            .with_register(MAC1, 0x0000_0011)
            .with_register(LOCK, 0x0000_0300);

        let result =
            FuseController::new(mac, &mut store).commit(&desired(mac, "00:11:22:33:44:55"));

        match result {
            Err(Error::Conflict {
                fused, requested, ..
            }) => {
                assert_eq!(fused, "00:11:ff:33:44:55");
                assert_eq!(requested, "00:11:22:33:44:55");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_commit_locked() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new().with_register(LOCK, 0x0000_0100);

        let result =
            FuseController::new(mac, &mut store).commit(&desired(mac, "00:11:22:33:44:55"));

        assert!(matches!(result, Err(Error::Locked { .. })));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_unrelated_lock_bits_are_ignored() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new().with_register(LOCK, 0x0000_4000);

        FuseController::new(mac, &mut store)
            .commit(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();

        assert_eq!(store.register(&LOCK), 0x0000_4300);
    }

    #[test]
    fn test_resume_unsealed() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new()
            .with_register(MAC0, 0x2233_4455)
            .with_register(MAC1, 0x0000_0011);

        let mut controller = FuseController::new(mac, &mut store);
        assert_eq!(
            controller.query().unwrap(),
            ProgrammedState::Unsealed(desired(mac, "00:11:22:33:44:55").value)
        );
        assert!(matches!(
            controller.verify(&desired(mac, "00:11:22:33:44:55")),
            Err(Error::NotProgrammed { .. })
        ));

        let outcome = controller
            .commit(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Programmed);
        // Value registers already hold every bit, only the lock is written
        assert_eq!(store.writes(), &[(LOCK, 0x0000_0300)]);
    }

    #[test]
    fn test_resume_unsealed_partial() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new().with_register(MAC0, 0x2233_4455);

        FuseController::new(mac, &mut store)
            .commit(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();

        assert_eq!(store.writes(), &[(MAC1, 0x0000_0011), (LOCK, 0x0000_0300)]);
    }

    #[test]
    fn test_unsealed_conflict() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new().with_register(MAC0, 0x8000_0000);

        let result =
            FuseController::new(mac, &mut store).commit(&desired(mac, "00:11:22:33:44:55"));

        assert!(matches!(result, Err(Error::Conflict { .. })));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_verify() {
        let mac = fuse(Chip::Imx6, "MAC");
        let mut store = MemoryStore::new();

        assert!(matches!(
            FuseController::new(mac, &mut store).verify(&desired(mac, "00:11:22:33:44:55")),
            Err(Error::NotProgrammed { .. })
        ));

        let mut store = MemoryStore::new()
            .with_register(MAC0, 0x2233_4455)
            .with_register(MAC1, 0x0000_0011)
            .with_register(LOCK, 0x0000_0300);
        let mut controller = FuseController::new(mac, &mut store);

        controller
            .verify(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();
        assert!(matches!(
            controller.verify(&desired(mac, "99:11:22:33:44:55")),
            Err(Error::Mismatch { .. })
        ));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_flag() {
        let flag = fuse(Chip::Imx6, "CFG5_SJC_DISABLE");
        let value = flag.parse_value(None).unwrap();
        let mut store = MemoryStore::new().with_register(CFG5, 0x0000_0010);

        let mut controller = FuseController::new(flag, &mut store);
        assert_eq!(controller.query().unwrap(), ProgrammedState::Unfused);
        assert!(matches!(
            controller.verify(&value),
            Err(Error::NotProgrammed { .. })
        ));
        assert_eq!(controller.commit(&value).unwrap(), CommitOutcome::Programmed);
        assert_eq!(controller.query().unwrap(), ProgrammedState::Fused(FuseValue::Set));
        controller.verify(&value).unwrap();

        assert_eq!(store.writes(), &[(CFG5, 0x0010_0010)]);
    }

    #[test]
    fn test_choice() {
        let lock = fuse(Chip::Imx8mm, "LOCK_MAC");
        let mut store = MemoryStore::new().with_register(ocotp::imx8mm::HW_OCOTP_LOCK, 0x3);

        let mut controller = FuseController::new(lock, &mut store);
        assert_eq!(controller.query().unwrap(), ProgrammedState::Unfused);
        controller.verify(&desired(lock, "NONE")).unwrap();
        assert_eq!(
            controller.commit(&desired(lock, "NONE")).unwrap(),
            CommitOutcome::AlreadyProgrammed
        );
        assert_eq!(
            controller.commit(&desired(lock, "wp")).unwrap(),
            CommitOutcome::Programmed
        );
        assert_eq!(
            controller.query().unwrap(),
            ProgrammedState::Fused(FuseValue::Choice("WP"))
        );
        assert!(matches!(
            controller.commit(&desired(lock, "OP")),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            controller.verify(&desired(lock, "NONE")),
            Err(Error::Mismatch { .. })
        ));

        assert_eq!(
            store.writes(),
            &[(ocotp::imx8mm::HW_OCOTP_LOCK, 0x0000_4003)]
        );
    }

    #[test]
    fn test_shared_mac_register() {
        let mac = fuse(Chip::Imx8mp, "MAC");
        let mac2 = fuse(Chip::Imx8mp, "MAC2");
        let mut store = MemoryStore::new();

        FuseController::new(mac, &mut store)
            .commit(&desired(mac, "00:11:22:33:44:55"))
            .unwrap();
        FuseController::new(mac2, &mut store)
            .commit(&desired(mac2, "66:77:88:99:aa:bb"))
            .unwrap();

        assert_eq!(store.register(&ocotp::imx8mm::HW_OCOTP_MAC_ADDR0), 0x2233_4455);
        assert_eq!(store.register(&ocotp::imx8mm::HW_OCOTP_MAC_ADDR1), 0xaabb_0011);
        assert_eq!(store.register(&ocotp::imx8mp::HW_OCOTP_MAC_ADDR2), 0x6677_8899);

        assert_eq!(
            FuseController::new(mac, &mut store).query().unwrap().to_string(),
            "00:11:22:33:44:55"
        );
        assert_eq!(
            FuseController::new(mac2, &mut store).query().unwrap().to_string(),
            "66:77:88:99:aa:bb"
        );
    }

    #[test]
    fn test_srk() {
        let srk = fuse(Chip::Imx6, "SRK");
        let value = desired(
            srk,
            "0x11111111,0x22222222,0x33333333,0x44444444,\
             0x55555555,0x66666666,0x77777777,0x88888888",
        );
        let mut store = MemoryStore::new();

        FuseController::new(srk, &mut store).commit(&value).unwrap();

        let writes = store.writes();
        assert_eq!(writes.len(), 9);
        assert_eq!(writes[0], (ocotp::imx6::HW_OCOTP_SRK[0], 0x1111_1111));
        assert_eq!(writes[7], (ocotp::imx6::HW_OCOTP_SRK[7], 0x8888_8888));
        assert_eq!(writes[8], (LOCK, 0x0000_4000));
    }

    #[test]
    fn test_boot_device_is_shifted_into_its_field() {
        let boot = fuse(Chip::Imx8mn, "BOOT_DEVICE");
        let mut store = MemoryStore::new();

        FuseController::new(boot, &mut store)
            .commit(&desired(boot, "SDP"))
            .unwrap();

        assert_eq!(
            store.register(&ocotp::imx8mn::HW_OCOTP_BOOT_CFG0),
            0x0000_1000
        );
        assert_eq!(
            FuseController::new(boot, &mut store).query().unwrap(),
            ProgrammedState::Fused(FuseValue::Choice("SDP"))
        );
    }
}
