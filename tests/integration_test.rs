use if_chain::if_chain;
use ppg_oximeter::record::{Channel, Sample};
use ppg_oximeter::sampling::{BLOCK_LEN, WINDOW_LEN};
use ppg_oximeter::{Estimator, Reading};

/// Raw PPG intensity: a sharp drop at each beat followed by a slow recovery.
fn ppg(n: usize, period: i32, dc: i32, amplitude: i32) -> Vec<i32> {
    let rise = period / 5;
    (0..n as i32)
        .map(|t| {
            let phase = t % period;
            let volume = if phase < rise {
                phase * 1000 / rise
            } else {
                1000 - (phase - rise) * 1000 / (period - rise)
            };
            dc - amplitude * volume / 1000
        })
        .collect()
}

/// Feeds the signal to the estimator one block at a time, like a sensor driver would.
fn stream(estimator: &mut Estimator<[i32; WINDOW_LEN]>, ir: &[i32], red: &[i32]) -> Vec<Reading> {
    let mut readings = Vec::new();

    for received in 1..=ir.len() {
        if_chain! {
            if received >= WINDOW_LEN;
            if received % BLOCK_LEN == 0;
            if let Ok(reading) = estimator.update(&ir[..received], &red[..received]);
            then {
                readings.push(reading);
            }
        }
    }

    readings
}

#[test]
fn test_recorded_signal() {
    let mut estimator = Estimator::new();

    let data = include_str!("./data/ppg_78bpm.txt");
    let (ir, red): (Vec<i32>, Vec<i32>) = data
        .split_terminator('\n')
        .map(|line| {
            let mut fields = line.trim().split(',');
            let ir = fields.next().unwrap().parse::<i32>().unwrap();
            let red = fields.next().unwrap().parse::<i32>().unwrap();
            (ir, red)
        })
        .unzip();

    let readings = stream(&mut estimator, &ir, &red);
    let readings: Vec<(i32, i32)> = readings.iter().map(|r| (r.heart_rate, r.spo2)).collect();

    assert_eq!(
        readings,
        [
            (77, 95),
            (77, 95),
            (76, 95),
            (76, 95),
            (76, 95),
            (76, 96),
            (76, 95),
            (76, 95),
            (76, 95),
            (76, 95),
            (77, 95),
        ]
    );
}

#[test]
fn test_heart_rate_matches_period() {
    for &(period, spo2) in [(100, 92), (80, 93), (60, 92)].iter() {
        let mut estimator = Estimator::new();
        let ir = ppg(1000, period, 50_000, 1000);
        let red = ppg(1000, period, 40_000, 600);

        let readings = stream(&mut estimator, &ir, &red);
        assert_eq!(readings.len(), 6);
        for reading in readings {
            assert!((reading.heart_rate - 6000 / period).abs() <= 1);
            assert_eq!(reading.spo2, spo2);
        }
    }
}

#[test]
fn test_finger_removed() {
    let mut estimator = Estimator::new();
    let mut ir = ppg(WINDOW_LEN, 100, 50_000, 1000);
    let mut red = ppg(WINDOW_LEN, 100, 40_000, 600);
    ir.resize(1100, 50_000);
    red.resize(1100, 40_000);

    let readings = stream(&mut estimator, &ir, &red);

    // once the pulses leave the window the last reading is held
    assert_eq!(readings.len(), 7);
    assert!(readings.iter().all(|r| *r
        == Reading {
            heart_rate: 60,
            spo2: 92
        }));
}

#[test]
fn test_flat_signal_reports_raw_samples() {
    let mut estimator = Estimator::new();
    let ir: Vec<i32> = (0..700).map(|t| 30_000 + t).collect();
    let red = vec![28_000; 700];

    let readings = stream(&mut estimator, &ir, &red);

    // the first reading falls back to the newest raw samples and is then held
    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|r| *r
        == Reading {
            heart_rate: 30_499,
            spo2: 28_000
        }));
}

#[test]
fn test_streams_are_independent() {
    let mut slow = Estimator::new();
    let mut fast = Estimator::new();

    let slow_ir = ppg(800, 100, 50_000, 1000);
    let slow_red = ppg(800, 100, 40_000, 600);
    let fast_ir = ppg(800, 60, 50_000, 1000);
    let fast_red = ppg(800, 60, 40_000, 600);

    for received in (WINDOW_LEN..=800).step_by(BLOCK_LEN) {
        let a = slow.update(&slow_ir[..received], &slow_red[..received]).unwrap();
        let b = fast.update(&fast_ir[..received], &fast_red[..received]).unwrap();
        assert_eq!(a.heart_rate, 60);
        assert_eq!(b.heart_rate, 100);
    }
}

#[test]
fn test_sample_records() {
    let mut estimator = Estimator::new();
    let ir = ppg(600, 80, 50_000, 1000);
    let red = ppg(600, 80, 40_000, 600);

    let records = |values: &[i32], channel| -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(order, &v)| Sample::new(v, channel, 1000 + order as u32))
            .collect()
    };
    let ir = records(&ir, Channel::Ir);
    let red = records(&red, Channel::Red);

    let (hr, spo2) = estimator.process(&ir[..500], &red[..500]).unwrap();
    assert_eq!(hr, Sample::new(75, Channel::Ir, 1499));
    assert_eq!(spo2, Sample::new(93, Channel::Red, 1499));

    let (hr, spo2) = estimator.process(&ir, &red).unwrap();
    assert_eq!((hr.order, spo2.order), (1599, 1599));
    assert_eq!((hr.value, spo2.value), (75, 93));

    assert!(estimator.process(&ir[..499], &red).is_err());
}

#[test]
fn test_full_scale_samples() {
    let mut estimator = Estimator::new();
    let mut edge = vec![i32::MIN; 250];
    edge.resize(WINDOW_LEN, i32::MAX);
    assert_eq!(
        estimator.update(&edge, &edge),
        Ok(Reading {
            heart_rate: i32::MAX,
            spo2: i32::MAX
        })
    );

    let mut estimator = Estimator::new();
    let mut spike = vec![i32::MAX; WINDOW_LEN - 1];
    spike.push(i32::MIN);
    assert_eq!(
        estimator.update(&spike, &spike),
        Ok(Reading {
            heart_rate: i32::MIN,
            spo2: i32::MIN
        })
    );

    // square pulses swinging across the whole sample range
    let mut estimator = Estimator::new();
    let square: Vec<i32> = (0..WINDOW_LEN)
        .map(|t| if t % 100 < 20 { i32::MIN } else { i32::MAX })
        .collect();
    assert_eq!(
        estimator.update(&square, &square),
        Ok(Reading {
            heart_rate: 60,
            spo2: 80
        })
    );
}

#[test]
fn test_out_of_range_ratio_keeps_last_spo2() {
    let ir = ppg(WINDOW_LEN, 100, 50_000, 1000);

    // red amplitude and the SpO2 presented after a reading of 93
    for &(red_amplitude, spo2) in [(20, 93), (40, 96), (1470, 0), (1475, 93)].iter() {
        let mut estimator = Estimator::new();
        let reading = estimator
            .update(
                &ppg(WINDOW_LEN, 80, 50_000, 1000),
                &ppg(WINDOW_LEN, 80, 40_000, 600),
            )
            .unwrap();
        assert_eq!((reading.heart_rate, reading.spo2), (75, 93));

        estimator.clear();
        let reading = estimator
            .update(&ir, &ppg(WINDOW_LEN, 100, 40_000, red_amplitude))
            .unwrap();
        assert_eq!(
            (reading.heart_rate, reading.spo2),
            (60, spo2),
            "red amplitude {}",
            red_amplitude
        );
    }
}
