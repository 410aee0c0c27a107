mod common;

use nrf24l01::{
    radio::{prelude::*, registers, Nrf24Error, RadioConfig},
    DataRate, FifoState, Mode, PaLevel,
};

const ADDRESS: [u8; 5] = [0xDE, 0xAD, 0xBE, 0xEF, 0x01];

fn payload(len: usize) -> Vec<u8> {
    (0..len as u8).map(|b| b.wrapping_mul(7).wrapping_add(1)).collect()
}

#[test]
fn every_payload_length_completes() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    for len in 1..=32usize {
        radio.flush_tx().unwrap();
        assert!(!radio.is_tx_fifo_full().unwrap());

        let reachable = len % 3 != 0;
        sim.chip().peer_reachable = reachable;
        radio.submit_data(&payload(len)).unwrap();
        match radio.attempt_tx() {
            Ok(()) => assert!(reachable),
            Err(Nrf24Error::MaxRetransmitsReached) => assert!(!reachable),
            Err(e) => panic!("unexpected error: {e:?}"),
        }
        assert_eq!(radio.mode(), Mode::PowerDown);
    }
    let chip = sim.chip();
    assert_eq!(chip.transmitted.len(), 22);
    assert!(chip.transmitted.iter().all(|p| p[0] == 1));
    assert_eq!(chip.failed_attempts, 10);
}

#[test]
fn empty_pipe_field_is_not_ready() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    // RX_DR is stale while the RX FIFO is empty
    sim.chip().raise_flags(0x40);
    let status = radio.get_status().unwrap();
    assert!(status.rx_dr());
    assert_eq!(status.rx_pipe(), 7);
    assert_eq!(radio.is_data_ready(), Ok(None));
    assert_eq!(radio.poll_data_ready(), Err(nb::Error::WouldBlock));
    assert_eq!(
        radio.get_data(0, &mut [0u8; 32]),
        Err(Nrf24Error::NotReady)
    );
}

#[test]
fn small_buffer_leaves_payload_in_fifo() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.set_rx_packet_size(1, 10).unwrap();
    let sent = payload(10);
    sim.chip().put_on_air([0xC2; 5], &sent);

    assert_eq!(radio.wait_for_data(), Ok(1));
    let mut small = [0xAAu8; 4];
    assert_eq!(
        radio.get_data(1, &mut small),
        Err(Nrf24Error::BufferTooSmall { available: 10 })
    );
    assert_eq!(small, [0xAAu8; 4]);
    assert_eq!(sim.chip().rx_fifo_len(), 1);

    let mut buf = [0u8; 32];
    assert_eq!(radio.get_data(1, &mut buf), Ok(10));
    assert_eq!(&buf[..10], sent.as_slice());
    assert!(radio.is_rx_fifo_empty().unwrap());
}

#[test]
fn dynamic_payloads_are_idempotent() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.enable_dynamic_payloads(0).unwrap();
    let once = {
        let chip = sim.chip();
        (chip.reg(registers::FEATURE), chip.reg(registers::DYNPD))
    };
    radio.enable_dynamic_payloads(0).unwrap();
    let chip = sim.chip();
    assert_eq!(
        (chip.reg(registers::FEATURE), chip.reg(registers::DYNPD)),
        once
    );
    assert_eq!(once, (0x04, 0x01));
    assert_eq!(chip.activations, 1);
}

#[test]
fn reinit_keeps_features_unlocked() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.enable_no_ack_tx().unwrap();
    radio.init().unwrap();
    assert!(!radio.no_ack_tx_enabled());
    assert_eq!(sim.chip().reg(registers::FEATURE), 0);

    radio.enable_dynamic_payloads(2).unwrap();
    let chip = sim.chip();
    assert_eq!(chip.activations, 1);
    assert_eq!(chip.reg(registers::DYNPD), 0x04);
}

#[test]
fn pipe1_address_round_trip() {
    let (mut radio, _sim) = common::radio();
    radio.init().unwrap();
    radio
        .write_register_multi(registers::RX_ADDR_P1, &ADDRESS)
        .unwrap();
    let mut read_back = [0u8; 5];
    radio
        .read_register_multi(registers::RX_ADDR_P1, &mut read_back)
        .unwrap();
    assert_eq!(read_back, ADDRESS);

    let mut through_trait = [0u8; 5];
    assert_eq!(radio.get_rx_address(1, &mut through_trait), Ok(5));
    assert_eq!(through_trait, ADDRESS);
}

#[test]
fn receive_23_bytes_on_pipe0() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.set_rx_address(0, &ADDRESS).unwrap();
    radio.set_rx_packet_size(0, 23).unwrap();
    let sent = payload(23);
    sim.chip().put_on_air(ADDRESS, &sent);

    assert_eq!(radio.wait_for_data(), Ok(0));
    assert_eq!(radio.mode(), Mode::Standby);
    let mut buf = [0u8; 32];
    assert_eq!(radio.get_data(0, &mut buf), Ok(23));
    assert_eq!(&buf[..23], sent.as_slice());
    // RX_DR was cleared
    assert!(!radio.get_status().unwrap().rx_dr());
}

#[test]
fn submit_mirrors_tx_address() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.set_tx_address(&ADDRESS).unwrap();
    radio.submit_data(&payload(23)).unwrap();
    assert_eq!(sim.chip().rx_addr_p0(), ADDRESS);
    assert!(sim.chip().transmitted.is_empty());

    let mut pipe0 = [0u8; 5];
    radio.get_rx_address(0, &mut pipe0).unwrap();
    assert_eq!(pipe0, ADDRESS);
}

#[test]
fn submit_without_auto_ack_keeps_pipe0() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.set_auto_ack_pipe(0, false).unwrap();
    radio.set_tx_address(&ADDRESS).unwrap();
    radio.submit_data(&payload(4)).unwrap();
    assert_eq!(sim.chip().rx_addr_p0(), [0xE7; 5]);
}

#[test]
fn max_retransmits_then_flush_and_retry() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    sim.chip().peer_reachable = false;
    let first = payload(8);
    assert_eq!(
        radio.send_data(&first),
        Err(Nrf24Error::MaxRetransmitsReached)
    );
    // the payload stays queued
    assert_eq!(sim.chip().tx_fifo_len(), 1);
    assert_eq!(radio.get_last_arc(), Ok(3));

    radio.flush_tx().unwrap();
    sim.chip().peer_reachable = true;
    let second = payload(12);
    radio.send_data(&second).unwrap();
    assert_eq!(sim.chip().transmitted, vec![second]);
    assert_eq!(radio.get_last_arc(), Ok(0));
}

#[test]
fn send_to_changes_tx_address() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.send_data_to(&ADDRESS, b"hello").unwrap();
    let mut tx_address = [0u8; 5];
    radio.get_tx_address(&mut tx_address).unwrap();
    assert_eq!(tx_address, ADDRESS);
    assert_eq!(sim.chip().transmitted, vec![b"hello".to_vec()]);
    assert_eq!(
        radio.send_data_to(&ADDRESS[..3], b"hello"),
        Err(Nrf24Error::InvalidArgument)
    );
}

#[test]
fn tx_fifo_fills_up() {
    let (mut radio, _sim) = common::radio();
    radio.init().unwrap();
    assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Empty));
    for i in 0..3u8 {
        radio.submit_data(&[i]).unwrap();
    }
    assert!(radio.is_tx_fifo_full().unwrap());
    assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Full));
    assert_eq!(radio.submit_data(&[3]), Err(Nrf24Error::TxFifoFull));

    radio.flush_tx().unwrap();
    assert!(!radio.is_tx_fifo_full().unwrap());
    assert!(radio.is_tx_fifo_empty().unwrap());
}

#[test]
fn ack_payload_comes_back() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.enable_ack_payloads().unwrap();
    assert!(radio.ack_payloads_enabled());
    sim.chip().peer_ack_payload = Some(b"pong".to_vec());

    radio.send_data(b"ping").unwrap();
    assert_eq!(radio.is_data_ready(), Ok(Some(0)));
    assert_eq!(radio.get_rx_data_amount(0), Ok(4));
    let mut buf = [0u8; 32];
    assert_eq!(radio.get_data(0, &mut buf), Ok(4));
    assert_eq!(&buf[..4], b"pong");
}

#[test]
fn ack_payload_is_sent_with_the_ack() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.enable_ack_payloads().unwrap();
    radio.set_ack_payload(1, b"ack").unwrap();
    assert_eq!(sim.chip().tx_fifo_len(), 1);

    sim.chip().put_on_air([0xC2; 5], b"data");
    assert_eq!(radio.wait_for_data(), Ok(1));
    assert_eq!(sim.chip().tx_fifo_len(), 0);
    let mut buf = [0u8; 32];
    assert_eq!(radio.get_data(1, &mut buf), Ok(4));
    assert_eq!(&buf[..4], b"data");
}

#[test]
fn no_ack_transmission() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    sim.chip().peer_reachable = false;
    assert_eq!(
        radio.submit_data_no_ack(b"x"),
        Err(Nrf24Error::InvalidArgument)
    );
    radio.enable_no_ack_tx().unwrap();
    radio.submit_data_no_ack(b"x").unwrap();
    radio.attempt_tx().unwrap();
    assert_eq!(sim.chip().transmitted, vec![b"x".to_vec()]);
}

#[test]
fn reuse_payload() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.submit_data(b"again").unwrap();
    radio.reuse_tx_payload().unwrap();
    radio.attempt_tx().unwrap();
    radio.attempt_tx().unwrap();
    let chip = sim.chip();
    assert_eq!(chip.transmitted.len(), 2);
    assert_eq!(chip.tx_fifo_len(), 1);
}

#[test]
fn feature_writes_rejected_while_active() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    radio.enable_rx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::RxActive);
    assert_eq!(
        radio.enable_dynamic_payloads(0),
        Err(Nrf24Error::RadioActive)
    );
    assert_eq!(sim.chip().activations, 0);
    radio.disable_rx_mode().unwrap();
    radio.enable_dynamic_payloads(0).unwrap();
    assert_eq!(sim.chip().activations, 1);
}

#[test]
fn mode_transitions() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    assert_eq!(radio.mode(), Mode::PowerDown);
    radio.power_up(Some(1500)).unwrap();
    assert_eq!(radio.mode(), Mode::Standby);
    assert!(!sim.chip().ce());

    radio.enable_rx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::RxActive);
    assert!(sim.chip().ce());
    assert_eq!(sim.chip().reg(registers::CONFIG) & 0x03, 0x03);

    radio.enable_tx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::TxActive);
    assert_eq!(sim.chip().reg(registers::CONFIG) & 0x03, 0x02);

    radio.disable_tx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::Standby);
    assert!(!sim.chip().ce());

    radio.power_down().unwrap();
    assert_eq!(radio.mode(), Mode::PowerDown);
    assert_eq!(sim.chip().reg(registers::CONFIG) & 0x02, 0);
}

#[test]
fn custom_config_reads_back() {
    let (mut radio, _sim) = common::radio();
    let config = RadioConfig::default()
        .with_channel(76)
        .with_data_rate(DataRate::Mbps1)
        .with_pa_level(PaLevel::High)
        .with_address_width(4)
        .with_payload_width(3, 16)
        .with_rx_address(3, [0x33, 0, 0, 0, 0]);
    radio.with_config(&config).unwrap();
    assert_eq!(radio.get_channel(), Ok(76));
    assert_eq!(radio.get_data_rate(), Ok(DataRate::Mbps1));
    assert_eq!(radio.get_pa_level(), Ok(PaLevel::High));
    assert_eq!(radio.get_address_width(), Ok(4));
    assert_eq!(radio.get_rx_packet_size(3), Ok(16));
    let mut lsb = [0u8; 1];
    assert_eq!(radio.get_rx_address(3, &mut lsb), Ok(1));
    assert_eq!(lsb, [0x33]);
    assert!(!radio.carrier_detect().unwrap());

    radio.set_pa_gain(-12).unwrap();
    assert_eq!(radio.get_pa_level(), Ok(PaLevel::Low));
    assert_eq!(radio.set_channel(126), Err(Nrf24Error::InvalidArgument));
}

#[test]
fn every_frame_is_one_transaction() {
    let (mut radio, sim) = common::radio();
    radio.init().unwrap();
    let before = sim.chip().frames;
    radio.set_tx_address(&ADDRESS).unwrap();
    radio.read_register(registers::RF_CH).unwrap();
    radio.flush_rx().unwrap();
    assert_eq!(sim.chip().frames - before, 3);
}
