// see https://github.com/rp-rs/rp-hal/blob/main/boards/rp-pico/examples/pico_gpio_irq_example.rs
// see https://github.com/rp-rs/rp-hal/blob/main/boards/rp-pico/examples/pico_pwm_blink.rs
// see https://github.com/rp-rs/rp-hal/blob/main/rp2040-hal/examples/adc.rs
// see https://github.com/jamwaffles/ssd1306/tree/master/examples
// see https://github.com/rp-rs/rp-hal/blob/main/boards/rp-pico/examples/pico_usb_serial_interrupt.rs
#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use cortex_m_rt::entry;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::digital::v2::OutputPin;
use embedded_time::fixed_point::FixedPoint;
use embedded_time::rate::Extensions;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;
// use sparkfun_pro_micro_rp2040 as bsp;

// A shorter alias for the Peripheral Access Crate, which provides low-level
// register access
use bsp::hal::pac;
use bsp::hal::pac::interrupt;
use bsp::{hal, XOSC_CRYSTAL_FREQ};

// Some traits we need
use bsp::hal::clocks::Clock;

use hal::gpio::{bank0, Interrupt::EdgeLow, Pin, PullUpInput, PushPullOutput};

// USB Device support
use usb_device::{class_prelude::*, prelude::*};
// USB Communications Class Device support
use usbd_serial::SerialPort;

use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};

use pico_joystick_oled::config::{self, timing};
use pico_joystick_oled::controls::{ButtonEvent, Effect, Mode, ModeController};
use pico_joystick_oled::diagnostics::{format_sample_line, LINE_CAPACITY};
use pico_joystick_oled::display::{init_display, render};
use pico_joystick_oled::joystick::Joystick;
use pico_joystick_oled::leds::{drive, PwmLeds};

/// External high-speed crystal on the Raspberry Pi Pico board is 12 MHz. Adjust
/// if your board has a different frequency
const XTAL_FREQ_HZ: u32 = XOSC_CRYSTAL_FREQ;

type JoystickButtonPin = Pin<bank0::Gpio22, PullUpInput>;
type ActionButtonPin = Pin<bank0::Gpio5, PullUpInput>;
type GreenLedPin = Pin<bank0::Gpio11, PushPullOutput>;

/// Everything the GPIO interrupt touches besides the mode state
struct ButtonIrq {
    joystick_button: JoystickButtonPin,
    action_button: ActionButtonPin,
    green_led: GreenLedPin,
    timer: hal::Timer,
}

static BUTTON_IRQ: Mutex<RefCell<Option<ButtonIrq>>> = Mutex::new(RefCell::new(None));

/// Written by the interrupt, read once per loop by `main`
static MODE: Mutex<RefCell<ModeController>> = Mutex::new(RefCell::new(ModeController::new()));

/// USB device and serial class, polled from `USBCTRL_IRQ`
struct UsbConsole {
    device: UsbDevice<'static, hal::usb::UsbBus>,
    serial: SerialPort<'static, hal::usb::UsbBus>,
}

static USB_CONSOLE: Mutex<RefCell<Option<UsbConsole>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    info!("Program start");

    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let sio = hal::Sio::new(pac.SIO);

    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().integer());

    // Set the pins to their default state
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Init ADC: X on ADC1, Y on ADC0
    let adc = hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let x_pin = pins.gpio27.into_floating_input();
    let y_pin = pins.gpio26.into_floating_input();
    let mut joystick = Joystick::new(adc, x_pin, y_pin);
    info!(
        "ADC ready (X: GPIO{}, Y: GPIO{})",
        config::pins::JOYSTICK_X,
        config::pins::JOYSTICK_Y
    );
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init green LED
    let mut green_led = pins.gpio11.into_push_pull_output();
    green_led.set_low().unwrap();
    info!("Green LED ready (GPIO{})", config::pins::LED_GREEN);
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init buttons, active-low with internal pull-ups
    let joystick_button = pins.gpio22.into_pull_up_input();
    let action_button = pins.gpio5.into_pull_up_input();
    info!(
        "Buttons ready (joystick: GPIO{}, A: GPIO{})",
        config::pins::BUTTON_JOYSTICK,
        config::pins::BUTTON_A
    );
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init PWM: blue and red share slice 6, 8-bit wrap
    let pwm_slices = hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);
    let mut pwm = pwm_slices.pwm6;
    pwm.set_div_int(config::pwm::CLOCK_DIVIDER);
    pwm.set_top(u16::from(config::pwm::LED_WRAP));
    pwm.enable();
    pwm.channel_a.output_to(pins.gpio12);
    pwm.channel_b.output_to(pins.gpio13);
    let mut leds = PwmLeds::new(pwm.channel_a, pwm.channel_b);
    info!(
        "PWM ready (blue: GPIO{}, red: GPIO{})",
        config::pins::LED_BLUE,
        config::pins::LED_RED
    );
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init I2C
    let sda_pin = pins.gpio14.into_mode::<hal::gpio::FunctionI2C>();
    let scl_pin = pins.gpio15.into_mode::<hal::gpio::FunctionI2C>();
    let i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda_pin,
        scl_pin,
        config::display::I2C_FREQUENCY_HZ.Hz(),
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
    );
    info!("I2C ready ({} Hz)", config::display::I2C_FREQUENCY_HZ);
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init OLED
    let interface = I2CDisplayInterface::new_custom_address(i2c, config::display::I2C_ADDRESS);
    let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = init_display(&mut oled) {
        warn!("SSD1306 init failed: {}", Debug2Format(&e));
    }
    info!("SSD1306 ready (address {=u8:#x})", config::display::I2C_ADDRESS);
    delay.delay_ms(timing::INIT_SETTLE_MS);

    // Init USB serial console
    // Set the USB bus, it has to outlive the interrupt handler
    let usb_bus: &'static UsbBusAllocator<hal::usb::UsbBus> = cortex_m::singleton!(
        : UsbBusAllocator<hal::usb::UsbBus> = UsbBusAllocator::new(hal::usb::UsbBus::new(
            pac.USBCTRL_REGS,
            pac.USBCTRL_DPRAM,
            clocks.usb_clock,
            true,
            &mut pac.RESETS,
        ))
    )
    .unwrap();

    // Set the serial port
    let serial = SerialPort::new(usb_bus);

    // Set a USB device
    let device = UsbDeviceBuilder::new(usb_bus, UsbVidPid(0x16c0, 0x27dd))
        .manufacturer("Fake company")
        .product("Joystick OLED")
        .serial_number("0001")
        .device_class(2)
        .build();

    cortex_m::interrupt::free(|cs| {
        USB_CONSOLE
            .borrow(cs)
            .replace(Some(UsbConsole { device, serial }));
    });

    info!("Starting...");

    // Hand the buttons to the interrupt, falling edge only
    joystick_button.set_interrupt_enabled(EdgeLow, true);
    action_button.set_interrupt_enabled(EdgeLow, true);
    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS);
    cortex_m::interrupt::free(|cs| {
        BUTTON_IRQ.borrow(cs).replace(Some(ButtonIrq {
            joystick_button,
            action_button,
            green_led,
            timer,
        }));
    });
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    let mut line_buf = [0u8; LINE_CAPACITY];
    let mut previous_mode: Option<Mode> = None;

    // Main Loop
    loop {
        let mode = cortex_m::interrupt::free(|cs| MODE.borrow(cs).borrow().mode());
        if previous_mode != Some(mode) {
            info!(
                "border style {}, pwm {}",
                mode.border.index(),
                mode.pwm_enabled
            );
            previous_mode = Some(mode);
        }

        let sample = joystick.sample();

        if let Err(e) = render(&mut oled, sample, mode.border) {
            warn!("display update failed: {}", Debug2Format(&e));
        }

        leds.apply(drive(sample, mode.pwm_enabled));

        let line = format_sample_line(sample, &mut line_buf);
        cortex_m::interrupt::free(|cs| {
            if let Some(console) = USB_CONSOLE.borrow(cs).borrow_mut().as_mut() {
                // nobody listening is fine, the line is dropped
                let _ = console.serial.write(line);
            }
        });
        debug!("X: {}, Y: {}", sample.x, sample.y);

        delay.delay_ms(timing::LOOP_PERIOD_MS);
    }
}

fn apply_effect(green_led: &mut GreenLedPin, effect: Effect) {
    if let Effect::GreenLed(on) = effect {
        if on {
            green_led.set_high().unwrap();
        } else {
            green_led.set_low().unwrap();
        }
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    cortex_m::interrupt::free(|cs| {
        let mut button_irq = BUTTON_IRQ.borrow(cs).borrow_mut();
        let irq = match button_irq.as_mut() {
            Some(irq) => irq,
            None => return,
        };
        let mut controller = MODE.borrow(cs).borrow_mut();
        let now_us = irq.timer.get_counter();

        if irq.joystick_button.interrupt_status(EdgeLow) {
            irq.joystick_button.clear_interrupt(EdgeLow);
            if let Some(effect) = controller.handle(ButtonEvent::JoystickButton, now_us) {
                apply_effect(&mut irq.green_led, effect);
            }
        }

        if irq.action_button.interrupt_status(EdgeLow) {
            irq.action_button.clear_interrupt(EdgeLow);
            if let Some(effect) = controller.handle(ButtonEvent::ActionButton, now_us) {
                apply_effect(&mut irq.green_led, effect);
            }
        }
    });
}

/// Services the USB controller whenever it has work, independent of how
/// long the main loop spends on the display
#[interrupt]
fn USBCTRL_IRQ() {
    cortex_m::interrupt::free(|cs| {
        if let Some(console) = USB_CONSOLE.borrow(cs).borrow_mut().as_mut() {
            if console.device.poll(&mut [&mut console.serial]) {
                // the host may type into the console, drop it
                let mut buf = [0u8; 64];
                let _ = console.serial.read(&mut buf);
            }
        }
    });
}

// End of file
