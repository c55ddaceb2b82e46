//! Direct memory access controller
#![deny(missing_docs)]

// developers notes:
//
// This does not use the PAC for register access because:
//
// * svd2rust is not monomorphic for multiple instantiations of the same
//   peripheral
// * svd2rust does not have a way to index arrays of registers
// * the DMA and DMAMUX have links between them that the PAC cannot see

use core::{
    ops::Mul,
    ptr::{read_volatile, write_volatile},
};

use super::pac;

/// IRQ flags
pub mod flags {
    /// Global interrupt, combination of all other interrupts.
    pub const GLOBAL: u8 = 1 << 0;
    /// Transfer complete
    pub const XFER_CPL: u8 = 1 << 1;
    /// Transfer half complete
    pub const XFER_HLF: u8 = 1 << 2;
    /// Transfer error
    pub const XFER_ERR: u8 = 1 << 3;
}

const DMA1_BASE: usize = 0x4002_0000;

const MUX_BASE: usize = 0x4002_0800;
const MUX_CSR_ADDR: usize = MUX_BASE + 0x80;
const MUX_CCFR_ADDR: usize = MUX_BASE + 0x84;

/// Transfer size.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Size {
    /// 8-bit transfer size
    Bits8 = 0b00,
    /// 16-bit transfer size
    Bits16 = 0b01,
    /// 32-bit transfer size
    Bits32 = 0b10,
}

impl Size {
    const fn from_bits(bits: u32) -> Option<Size> {
        match bits {
            0b00 => Some(Size::Bits8),
            0b01 => Some(Size::Bits16),
            0b10 => Some(Size::Bits32),
            _ => None,
        }
    }
}

/// Priority levels.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Priority {
    /// Low priority
    Low = 0b00,
    /// Medium priority
    Medium = 0b01,
    /// High priority
    High = 0b10,
    /// Very high priority
    VeryHigh = 0b11,
}

/// Transfer directions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dir {
    /// Read from peripheral
    FromPeriph,
    /// Read from memory
    FromMem,
}

/// Channel configuration register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cr {
    val: u32,
}

impl Cr {
    /// Reset value of the register.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    /// assert_eq!(Cr::RESET.raw(), 0);
    /// ```
    pub const RESET: Cr = Cr::new(0);

    /// Reset value + DMA disabled.
    ///
    /// This is equivalent to the reset value, it is provided to make the code
    /// more expressive.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    /// assert_eq!(Cr::DISABLE.enabled(), false);
    /// assert_eq!(Cr::DISABLE, Cr::RESET);
    /// ```
    pub const DISABLE: Cr = Cr::RESET.set_enable(false);

    /// Create a new Cr register from a raw value.
    pub const fn new(val: u32) -> Cr {
        Cr { val }
    }

    /// Get the raw value of the register.
    pub const fn raw(self) -> u32 {
        self.val
    }

    /// Set the memory-to-memory mode bit.
    ///
    /// If enabled (`true`) the DMA channels operate without being triggered
    /// by a request from a peripheral.
    ///
    /// Note: The memory-to-memory mode must not be used in circular mode.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.mem2mem(), false);
    ///
    /// let cr = cr.set_mem2mem(true);
    /// assert_eq!(cr.mem2mem(), true);
    /// ```
    #[must_use = "set_mem2mem returns a modified Cr"]
    pub const fn set_mem2mem(mut self, en: bool) -> Cr {
        if en {
            self.val |= 1 << 14;
        } else {
            self.val &= !(1 << 14);
        }
        self
    }

    /// Get the memory-to-memory mode bit.
    pub const fn mem2mem(&self) -> bool {
        (self.val >> 14) & 0b1 != 0
    }

    /// Set the priority level.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::{Cr, Priority};
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.priority(), Priority::Low);
    ///
    /// let cr = cr.set_priority(Priority::VeryHigh);
    /// assert_eq!(cr.priority(), Priority::VeryHigh);
    /// ```
    #[must_use = "set_priority returns a modified Cr"]
    pub const fn set_priority(mut self, priority: Priority) -> Cr {
        self.val &= !(0b11 << 12);
        self.val |= ((priority as u32) & 0b11) << 12;
        self
    }

    /// Get the priority level.
    #[allow(clippy::wildcard_in_or_patterns)]
    pub const fn priority(&self) -> Priority {
        match (self.val >> 12) & 0b11 {
            0b00 => Priority::Low,
            0b01 => Priority::Medium,
            0b10 => Priority::High,
            0b11 | _ => Priority::VeryHigh,
        }
    }

    /// Defines the data size of each DMA transfer to the identified memory.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::{Cr, Size};
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.mem_size(), Some(Size::Bits8));
    ///
    /// let cr = cr.set_mem_size(Size::Bits32);
    /// assert_eq!(cr.mem_size(), Some(Size::Bits32));
    /// ```
    #[must_use = "set_mem_size returns a modified Cr"]
    pub const fn set_mem_size(mut self, size: Size) -> Cr {
        self.val &= !(0b11 << 10);
        self.val |= ((size as u32) & 0b11) << 10;
        self
    }

    /// Get the memory DMA transfer size.
    pub const fn mem_size(&self) -> Option<Size> {
        Size::from_bits((self.val >> 10) & 0b11)
    }

    /// Defines the data size of each DMA transfer to the identified peripheral.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::{Cr, Size};
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.periph_size(), Some(Size::Bits8));
    ///
    /// let cr = cr.set_periph_size(Size::Bits16);
    /// assert_eq!(cr.periph_size(), Some(Size::Bits16));
    /// ```
    #[must_use = "set_periph_size returns a modified Cr"]
    pub const fn set_periph_size(mut self, size: Size) -> Cr {
        self.val &= !(0b11 << 8);
        self.val |= ((size as u32) & 0b11) << 8;
        self
    }

    /// Get the peripheral DMA transfer size.
    pub const fn periph_size(&self) -> Option<Size> {
        Size::from_bits((self.val >> 8) & 0b11)
    }

    /// Defines the increment mode for each DMA transfer to the identified
    /// memory.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.mem_inc(), false);
    ///
    /// let cr = cr.set_mem_inc(true);
    /// assert_eq!(cr.mem_inc(), true);
    /// ```
    #[must_use = "set_mem_inc returns a modified Cr"]
    pub const fn set_mem_inc(mut self, inc: bool) -> Cr {
        if inc {
            self.val |= 1 << 7
        } else {
            self.val &= !(1 << 7)
        }
        self
    }

    /// Get the memory increment bit.
    pub const fn mem_inc(&self) -> bool {
        (self.val >> 7) & 0b1 != 0
    }

    /// Defines the increment mode for each DMA transfer to the identified
    /// peripheral.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.periph_inc(), false);
    ///
    /// let cr = cr.set_periph_inc(true);
    /// assert_eq!(cr.periph_inc(), true);
    /// ```
    #[must_use = "set_periph_inc returns a modified Cr"]
    pub const fn set_periph_inc(mut self, inc: bool) -> Cr {
        if inc {
            self.val |= 1 << 6
        } else {
            self.val &= !(1 << 6)
        }
        self
    }

    /// Get the peripheral increment bit.
    pub const fn periph_inc(&self) -> bool {
        (self.val >> 6) & 0b1 != 0
    }

    /// Set the circular mode bit.
    ///
    /// In circular mode, after the last data transfer, the `DMA_CNDTRx`
    /// register is automatically reloaded with the initially programmed value.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.circ(), false);
    ///
    /// let cr = cr.set_circ(true);
    /// assert_eq!(cr.circ(), true);
    /// ```
    #[must_use = "set_circ returns a modified Cr"]
    pub const fn set_circ(mut self, circ: bool) -> Cr {
        if circ {
            self.val |= 1 << 5
        } else {
            self.val &= !(1 << 5)
        }
        self
    }

    /// Get the circular mode bit.
    pub const fn circ(&self) -> bool {
        (self.val >> 5) & 0b1 != 0
    }

    /// Set the transfer direction from memory.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::{Cr, Dir};
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.dir(), Dir::FromPeriph);
    ///
    /// let cr = cr.set_dir_from_mem();
    /// assert_eq!(cr.dir(), Dir::FromMem);
    /// ```
    #[must_use = "set_dir_from_mem returns a modified Cr"]
    pub const fn set_dir_from_mem(self) -> Cr {
        self.set_dir(Dir::FromMem)
    }

    /// Set the transfer direction from peripheral.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::{Cr, Dir};
    ///
    /// let cr = Cr::RESET.set_dir_from_mem();
    /// assert_eq!(cr.dir(), Dir::FromMem);
    ///
    /// let cr = cr.set_dir_from_periph();
    /// assert_eq!(cr.dir(), Dir::FromPeriph);
    /// ```
    #[must_use = "set_dir_from_periph returns a modified Cr"]
    pub const fn set_dir_from_periph(self) -> Cr {
        self.set_dir(Dir::FromPeriph)
    }

    /// Set the transfer direction.
    #[must_use = "set_dir returns a modified Cr"]
    pub const fn set_dir(mut self, dir: Dir) -> Cr {
        match dir {
            Dir::FromPeriph => self.val &= !(1 << 4),
            Dir::FromMem => self.val |= 1 << 4,
        }
        self
    }

    /// Get the transfer direction.
    pub const fn dir(&self) -> Dir {
        match (self.val >> 4) & 0b1 != 0 {
            true => Dir::FromMem,
            false => Dir::FromPeriph,
        }
    }

    /// Enable the transfer error interrupt.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.xfer_err_irq_en(), false);
    ///
    /// let cr = cr.set_xfer_err_irq_en(true);
    /// assert_eq!(cr.xfer_err_irq_en(), true);
    /// ```
    #[must_use = "set_xfer_err_irq_en returns a modified Cr"]
    pub const fn set_xfer_err_irq_en(mut self, en: bool) -> Cr {
        match en {
            true => self.val |= 1 << 3,
            false => self.val &= !(1 << 3),
        }
        self
    }

    /// Returns `true` if the transfer error interrupt is enabled.
    pub const fn xfer_err_irq_en(&self) -> bool {
        (self.val >> 3) & 0b1 != 0
    }

    /// Enable the transfer half-complete interrupt.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.xfer_hlf_irq_en(), false);
    ///
    /// let cr = cr.set_xfer_hlf_irq_en(true);
    /// assert_eq!(cr.xfer_hlf_irq_en(), true);
    /// ```
    #[must_use = "set_xfer_hlf_irq_en returns a modified Cr"]
    pub const fn set_xfer_hlf_irq_en(mut self, en: bool) -> Cr {
        match en {
            true => self.val |= 1 << 2,
            false => self.val &= !(1 << 2),
        }
        self
    }

    /// Returns `true` if the transfer half-complete interrupt is enabled.
    pub const fn xfer_hlf_irq_en(&self) -> bool {
        (self.val >> 2) & 0b1 != 0
    }

    /// Enable the transfer complete interrupt.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.xfer_cpl_irq_en(), false);
    ///
    /// let cr = cr.set_xfer_cpl_irq_en(true);
    /// assert_eq!(cr.xfer_cpl_irq_en(), true);
    /// ```
    #[must_use = "set_xfer_cpl_irq_en returns a modified Cr"]
    pub const fn set_xfer_cpl_irq_en(mut self, en: bool) -> Cr {
        match en {
            true => self.val |= 1 << 1,
            false => self.val &= !(1 << 1),
        }
        self
    }

    /// Returns `true` if the transfer complete interrupt is enabled.
    pub const fn xfer_cpl_irq_en(&self) -> bool {
        (self.val >> 1) & 0b1 != 0
    }

    /// Set the enable bit for the DMA channel.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::Cr;
    ///
    /// let cr = Cr::RESET;
    /// assert_eq!(cr.enabled(), false);
    ///
    /// let cr = cr.set_enable(true);
    /// assert_eq!(cr.enabled(), true);
    /// ```
    #[must_use = "set_enable returns a modified Cr"]
    pub const fn set_enable(self, en: bool) -> Cr {
        if en {
            self.enable()
        } else {
            self.disable()
        }
    }

    /// Enable the DMA channel.
    #[must_use = "enable returns a modified Cr"]
    pub const fn enable(mut self) -> Cr {
        self.val |= 0b1;
        self
    }

    /// Disable the DMA channel.
    #[must_use = "disable returns a modified Cr"]
    pub const fn disable(mut self) -> Cr {
        self.val &= !0b1;
        self
    }

    /// Returns `true` if the DMA channel is enabled.
    pub const fn enabled(&self) -> bool {
        self.val & 0b1 != 0
    }
}

impl Default for Cr {
    fn default() -> Cr {
        Cr::RESET
    }
}

impl From<u32> for Cr {
    fn from(raw: u32) -> Cr {
        Cr::new(raw)
    }
}

impl From<Cr> for u32 {
    fn from(reg: Cr) -> u32 {
        reg.raw()
    }
}

impl core::fmt::Display for Cr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cr")
            .field("mem2mem", &self.mem2mem())
            .field("priority", &self.priority())
            .field("mem_size", &self.mem_size())
            .field("periph_size", &self.periph_size())
            .field("mem_inc", &self.mem_inc())
            .field("periph_inc", &self.periph_inc())
            .field("circ", &self.circ())
            .field("dir", &self.dir())
            .field("xfer_err_irq_en", &self.xfer_err_irq_en())
            .field("xfer_hlf_irq_en", &self.xfer_hlf_irq_en())
            .field("xfer_cpl_irq_en", &self.xfer_cpl_irq_en())
            .field("enabled", &self.enabled())
            .finish()
    }
}

/// DMA channel
#[derive(Debug)]
pub struct DmaCh {
    /// zero-index channel number (0-6)
    ch: u8,
    /// zero-index mux channel number (0-6)
    mux_ch: u8,
    /// interrupt number
    irq: pac::Interrupt,
    // here be registers
    mux_cr: *mut u32,
    isr: *const u32,
    ifcr: *mut u32,
    cr: *mut u32,
    ndt: *mut u32,
    pa: *mut u32,
    ma: *mut u32,
}

impl DmaCh {
    /// Create a DMA channel from its one-index channel number.
    ///
    /// # Safety
    ///
    /// This bypasses the singleton checks that normally occur.
    /// You are responsible for ensuring that the driver has exclusive access
    /// to the DMA channel, that the channel has been setup correctly, and that
    /// the arguments are valid: channel number is 1-7, interrupt matches the
    /// channel.
    const unsafe fn new(ch: u8, irq: pac::Interrupt) -> DmaCh {
        // mux channels map 1:1 onto DMA channels
        let mux_ch: u8 = ch - 1;
        let mux_ch_u: usize = mux_ch as usize;

        let ch: u8 = ch - 1;
        let ch_u: usize = ch as usize;

        DmaCh {
            ch,
            mux_ch,
            irq,
            mux_cr: (MUX_BASE + 0x4 * mux_ch_u) as *mut u32,
            isr: DMA1_BASE as *const u32,
            ifcr: (DMA1_BASE + 0x4) as *mut u32,
            cr: (DMA1_BASE + 0x08 + 0x14 * ch_u) as *mut u32,
            ndt: (DMA1_BASE + 0x0C + 0x14 * ch_u) as *mut u32,
            pa: (DMA1_BASE + 0x10 + 0x14 * ch_u) as *mut u32,
            ma: (DMA1_BASE + 0x14 + 0x14 * ch_u) as *mut u32,
        }
    }

    /// Get the interrupt flags for the DMA channel.
    ///
    /// **Note:** The upper 4 bits of the return value are unused.
    ///
    /// # Example
    ///
    /// Check if the transfer is complete.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::dma::flags;
    ///
    /// # let dma = unsafe { stm32g0xx_hal::dma::AllDma::steal().d1c1 };
    /// let xfer_cpl: bool = dma.flags() & flags::XFER_CPL != 0;
    /// ```
    pub fn flags(&self) -> u8 {
        let raw: u32 = unsafe { read_volatile(self.isr) };
        ((raw >> self.ch.mul(4)) & 0xF) as u8
    }

    fn clear_flags(&mut self, flags: u8) {
        let val: u32 = u32::from(flags & 0xF) << self.ch.mul(4);
        unsafe { write_volatile(self.ifcr, val) }
    }

    pub(crate) fn clear_all_flags(&mut self) {
        self.clear_flags(flags::GLOBAL | flags::XFER_CPL | flags::XFER_HLF | flags::XFER_ERR)
    }

    pub(crate) fn set_periph_addr(&mut self, pa: u32) {
        unsafe { write_volatile(self.pa, pa) }
    }

    pub(crate) fn set_mem_addr(&mut self, ma: u32) {
        unsafe { write_volatile(self.ma, ma) }
    }

    pub(crate) fn set_num_data_xfer(&mut self, ndt: u32) {
        unsafe { write_volatile(self.ndt, ndt) }
    }

    pub(crate) fn set_cr(&mut self, cr: Cr) {
        unsafe { write_volatile(self.cr, cr.raw()) }
    }

    pub(crate) fn set_mux_cr_reqid(&mut self, req_id: u8) {
        unsafe { write_volatile(self.mux_cr, req_id as u32) }
    }

    /// Returns `true` if the DMA MUX synchronization overrun bit is set for
    /// this channel.
    pub fn sync_ovr(&self) -> bool {
        let csr: u32 = unsafe { read_volatile(MUX_CSR_ADDR as *const u32) };
        csr >> self.mux_ch & 0b1 == 0b1
    }

    /// Clear the DMA MUX synchronization overrun bit for this channel.
    pub fn clear_sync_ovr(&mut self) {
        unsafe { write_volatile(MUX_CCFR_ADDR as *mut u32, 1 << self.mux_ch) };
    }

    /// Unmask the DMA interrupt in the NVIC.
    ///
    /// # Safety
    ///
    /// This can break mask-based critical sections.
    ///
    /// The DMA interrupts are not independent (one per channel), and enabling
    /// the interrupt for a DMA channel will enable other IRQs in the same
    /// group:
    ///
    /// * DMA channel 1
    /// * DMA channels 2 and 3
    /// * DMA channels 4 through 7
    pub unsafe fn unmask_irq(&self) {
        pac::NVIC::unmask(self.irq)
    }

    /// Mask the DMA interrupt in the NVIC.
    pub fn mask_irq(&self) {
        pac::NVIC::mask(self.irq)
    }
}

/// All DMA channels
#[derive(Debug)]
pub struct AllDma {
    /// DMA channel 1
    pub d1c1: DmaCh,
    /// DMA channel 2
    pub d1c2: DmaCh,
    /// DMA channel 3
    pub d1c3: DmaCh,
    /// DMA channel 4
    pub d1c4: DmaCh,
    /// DMA channel 5
    pub d1c5: DmaCh,
    /// DMA channel 6
    pub d1c6: DmaCh,
    /// DMA channel 7
    pub d1c7: DmaCh,
}

const ALL_DMA: AllDma = unsafe {
    AllDma {
        d1c1: DmaCh::new(1, pac::Interrupt::DMA_CHANNEL1),
        d1c2: DmaCh::new(2, pac::Interrupt::DMA_CHANNEL2_3),
        d1c3: DmaCh::new(3, pac::Interrupt::DMA_CHANNEL2_3),
        d1c4: DmaCh::new(4, pac::Interrupt::DMA_CHANNEL4_5_6_7),
        d1c5: DmaCh::new(5, pac::Interrupt::DMA_CHANNEL4_5_6_7),
        d1c6: DmaCh::new(6, pac::Interrupt::DMA_CHANNEL4_5_6_7),
        d1c7: DmaCh::new(7, pac::Interrupt::DMA_CHANNEL4_5_6_7),
    }
};

impl AllDma {
    /// Split the DMA registers into individual channels.
    ///
    /// This will enable clocks and reset the DMA controller.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{dma::AllDma, pac};
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let dma: AllDma = AllDma::split(dp.DMA, dp.DMAMUX, &mut dp.RCC);
    /// ```
    #[allow(unused_variables)]
    pub fn split(dma: pac::DMA, dmamux: pac::DMAMUX, rcc: &mut pac::RCC) -> AllDma {
        // DMA1EN is bit 0 of AHBENR; the DMAMUX is clocked with the DMA
        rcc.ahbenr.modify(|r, w| unsafe { w.bits(r.bits() | 0b1) });
        rcc.ahbenr.read(); // delay after an RCC peripheral clock enabling

        rcc.ahbrstr.modify(|r, w| unsafe { w.bits(r.bits() | 0b1) });
        rcc.ahbrstr.modify(|r, w| unsafe { w.bits(r.bits() & !0b1) });

        ALL_DMA
    }

    /// Steal all DMA channels.
    ///
    /// This will **not** initialize the DMA peripheral or the DMAMUX.
    ///
    /// # Safety
    ///
    /// This bypasses the singleton checks that normally occur.
    /// You are responsible for ensuring that the driver has exclusive access
    /// to each DMA channel, and that each channel has been setup correctly.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::dma::AllDma;
    ///
    /// // ... setup occurs here
    ///
    /// let dma: AllDma = unsafe { AllDma::steal() };
    /// ```
    pub const unsafe fn steal() -> AllDma {
        ALL_DMA
    }
}

#[cfg(test)]
mod tests {
    use super::{Cr, Dir, Priority, Size};

    #[test]
    fn cr_packing() {
        let cr: Cr = Cr::RESET
            .set_priority(Priority::High)
            .set_mem_size(Size::Bits16)
            .set_periph_size(Size::Bits8)
            .set_mem_inc(true)
            .set_dir_from_mem()
            .set_xfer_cpl_irq_en(true)
            .enable();

        assert_eq!(
            cr.raw(),
            (0b10 << 12) | (0b01 << 10) | (1 << 7) | (1 << 4) | (1 << 1) | 0b1
        );
        assert_eq!(cr.priority(), Priority::High);
        assert_eq!(cr.mem_size(), Some(Size::Bits16));
        assert_eq!(cr.periph_size(), Some(Size::Bits8));
        assert!(cr.mem_inc());
        assert!(!cr.periph_inc());
        assert_eq!(cr.dir(), Dir::FromMem);
        assert!(cr.xfer_cpl_irq_en());
        assert!(cr.enabled());
    }

    #[test]
    fn cr_field_independence() {
        let cr: Cr = Cr::RESET.set_mem_size(Size::Bits32).set_circ(true);
        let cr: Cr = cr.set_mem_size(Size::Bits8);
        assert!(cr.circ());
        assert_eq!(cr.mem_size(), Some(Size::Bits8));
        assert_eq!(cr.set_circ(false).raw(), 0);
    }
}
