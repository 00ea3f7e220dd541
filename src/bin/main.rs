#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::Instant;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, UsbDevice};
use picojoy::usb_output::{run_hid_writer, JoystickWriter};
use picojoy::{
    configure_usb_hid, read_serial_number, usb_config, DemoPattern, JoystickDescriptors,
    JoystickRequestHandler, ReportPublisher, ReportSignal, UsbDeviceHandler, UsbDriver,
    UsbHidOutput,
};
use static_cell::StaticCell;

#[cfg(feature = "cdc")]
use picojoy::serial_control::{configure_serial, run_serial, AcmRequestHandler, SerialControl};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Signal for passing the newest report from the publisher to the HID writer.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// so reports never queue up behind a slow host.
static REPORT_SIGNAL: StaticCell<ReportSignal> = StaticCell::new();

/// Descriptor set, fixed once the serial number has been read.
static DESCRIPTORS: StaticCell<JoystickDescriptors> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static DEVICE_HANDLER: StaticCell<UsbDeviceHandler> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<JoystickRequestHandler> = StaticCell::new();

/// CDC class request state.
#[cfg(feature = "cdc")]
static ACM_HANDLER: StaticCell<AcmRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PicoJoy starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Board identity ---
    let serial = read_serial_number(p.FLASH);
    info!("Serial number: {}", serial);
    let descriptors = DESCRIPTORS.init(JoystickDescriptors::new(serial));

    let signal = REPORT_SIGNAL.init(ReportSignal::new());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config(descriptors),
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    builder.handler(DEVICE_HANDLER.init(UsbDeviceHandler::new(descriptors)));

    // Interface 0: HID joystick
    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(JoystickRequestHandler::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Interfaces 1-2: CDC control
    #[cfg(feature = "cdc")]
    let serial_control = configure_serial(&mut builder, &ACM_HANDLER);

    // Build the USB device
    let usb_device = builder.build();

    let output = UsbHidOutput::new(signal);
    let publisher = ReportPublisher::new(DemoPattern);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(hid_writer_task(hid_writer, signal).unwrap());
    #[cfg(feature = "cdc")]
    spawner.spawn(serial_task(serial_control).unwrap());
    spawner.spawn(publisher_task(publisher, output).unwrap());

    info!("PicoJoy initialized, waiting for host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    device.run().await;
}

/// HID writer task - sends the newest report to the interrupt endpoint.
#[embassy_executor::task]
async fn hid_writer_task(mut writer: JoystickWriter, signal: &'static ReportSignal) {
    run_hid_writer(&mut writer, signal).await
}

/// Serial task - services the CDC control interface.
#[cfg(feature = "cdc")]
#[embassy_executor::task]
async fn serial_task(mut port: SerialControl) {
    run_serial(&mut port).await
}

/// Publisher task - polls the report publisher on every pass, then yields.
#[embassy_executor::task]
async fn publisher_task(mut publisher: ReportPublisher<DemoPattern>, mut output: UsbHidOutput) {
    loop {
        // Free-running millisecond clock; the publisher wraps with it.
        let now = Instant::now().as_millis() as u32;
        publisher.poll(now, &mut output);
        yield_now().await;
    }
}
