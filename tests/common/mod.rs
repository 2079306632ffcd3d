#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, NoAcknowledgeSource, Operation};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use si7005::*;

pub const NS_PER_MS: u64 = 1_000_000;

/// 0x2580 >> 2 = 2400 counts = 25 °C
pub const RAW_25_CENTIGRADE: u16 = 0x2580;
/// 0x4A00 >> 4 = 1184 counts, 50 % before linearization
pub const RAW_HUMIDITY: u16 = 0x4A00;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BusOp {
    Select,
    Deselect,
    Write { register: u8, value: u8 },
    Read { register: u8 },
}

/// Simulated Si7005: register file, power gated by chip-select, and a clock advanced by the
/// delay provider.
#[derive(Debug)]
pub struct Chip {
    pub now_ns: u64,
    pub selected: bool,
    pub present: bool,
    pub id: u8,
    pub raw_temperature: u16,
    pub raw_humidity: u16,
    pub stuck: bool,
    pub hang_delays: bool,
    pub yield_in_delays: bool,
    pub reject_humidity: bool,
    pub pointer: u8,
    pub config: u8,
    pub conversion_done_ns: Option<u64>,
    pub data: u16,
    pub log: Vec<(u64, BusOp)>,
}

impl Default for Chip {
    fn default() -> Self {
        Self {
            now_ns: 0,
            selected: false,
            present: true,
            id: 0x50,
            raw_temperature: RAW_25_CENTIGRADE,
            raw_humidity: RAW_HUMIDITY,
            stuck: false,
            hang_delays: false,
            yield_in_delays: false,
            reject_humidity: false,
            pointer: 0,
            config: 0,
            conversion_done_ns: None,
            data: 0,
            log: Vec::new(),
        }
    }
}

impl Chip {
    fn record(&mut self, op: BusOp) {
        self.log.push((self.now_ns, op));
    }

    fn write(&mut self, register: u8, value: u8) {
        self.record(BusOp::Write { register, value });
        match register {
            REG_CONFIG => {
                self.config = value;
                if value & CONFIG_START != 0 {
                    let conversion_ms = if value & CONFIG_FAST != 0 {
                        CONVERSION_TIME_FAST_MS
                    } else {
                        CONVERSION_TIME_NORMAL_MS
                    };
                    self.conversion_done_ns = Some(self.now_ns + conversion_ms as u64 * NS_PER_MS);
                }
            }
            REG_DATA => {
                self.data = if self.config & CONFIG_TEMPERATURE != 0 {
                    self.raw_temperature
                } else {
                    self.raw_humidity
                };
            }
            _ => {}
        }
    }

    fn read(&mut self, register: u8) -> u8 {
        self.record(BusOp::Read { register });
        match register {
            REG_STATUS => {
                let busy = self.stuck || self.conversion_done_ns.is_some_and(|done| self.now_ns < done);
                if busy { STATUS_NOT_READY } else { 0 }
            }
            REG_DATA_HIGH => (self.data >> 8) as u8,
            REG_DATA_LOW => self.data as u8,
            REG_CONFIG => self.config,
            REG_ID => self.id,
            _ => 0,
        }
    }

    /// Simulated milliseconds since `start_ns`
    pub fn elapsed_ms_since(&self, start_ns: u64) -> u64 {
        (self.now_ns - start_ns) / NS_PER_MS
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|(_, op)| match op {
                BusOp::Write { register, value } => Some((*register, *value)),
                _ => None,
            })
            .collect()
    }

    /// Every bus access happens while selected, and select/deselect strictly alternate
    pub fn assert_sequences_disjoint(&self) {
        let mut selected = false;
        for (at, op) in &self.log {
            match op {
                BusOp::Select => {
                    assert!(!selected, "second select at {at} ns before deselect");
                    selected = true;
                }
                BusOp::Deselect => selected = false,
                _ => assert!(selected, "{op:?} at {at} ns while deselected"),
            }
        }
        assert!(!selected, "sequence left the chip selected");
    }
}

#[derive(Debug)]
pub struct SimError;

impl i2c::Error for SimError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

pub struct SimI2c(pub Rc<RefCell<Chip>>);

impl i2c::ErrorType for SimI2c {
    type Error = SimError;
}

impl I2c for SimI2c {
    async fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), SimError> {
        let mut chip = self.0.borrow_mut();
        if address != I2C_ADDRESS || !chip.present || !chip.selected {
            return Err(SimError);
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => match **bytes {
                    [register] => chip.pointer = register,
                    [REG_CONFIG, value] if chip.reject_humidity && value & CONFIG_TEMPERATURE == 0 => {
                        return Err(SimError);
                    }
                    [register, value] => chip.write(register, value),
                    _ => return Err(SimError),
                },
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        let register = chip.pointer;
                        *byte = chip.read(register);
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct SimPin(pub Rc<RefCell<Chip>>);

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut chip = self.0.borrow_mut();
        chip.selected = true;
        chip.record(BusOp::Select);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut chip = self.0.borrow_mut();
        chip.selected = false;
        chip.record(BusOp::Deselect);
        Ok(())
    }
}

struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub struct SimDelay(pub Rc<RefCell<Chip>>);

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let (hang, yield_now) = {
            let mut chip = self.0.borrow_mut();
            chip.now_ns += ns as u64;
            (chip.hang_delays, chip.yield_in_delays)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if yield_now {
            YieldNow(false).await;
        }
    }
}

pub type SimSi7005 = Si7005<SimI2c, SimPin, SimDelay>;

pub fn sim_with(chip: Chip) -> (Rc<RefCell<Chip>>, SimSi7005) {
    let chip = Rc::new(RefCell::new(chip));
    let si7005 = Si7005::new(SimI2c(chip.clone()), SimPin(chip.clone()), SimDelay(chip.clone()));
    (chip, si7005)
}

pub fn sim() -> (Rc<RefCell<Chip>>, SimSi7005) {
    sim_with(Chip::default())
}
