use qcc_circuit::serialize::binary::{write_header, write_record, Instruction, InstructionKind};
use qcc_sched::validate::validate_schedule;
use qcc_sched::{scheduler_for, EmitterKind};
use std::io::Cursor;

fn encode(num_qubits: u32, insts: &[Instruction]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_header(&mut buf, num_qubits).unwrap();
    for inst in insts {
        write_record(&mut buf, inst).unwrap();
    }
    buf
}

#[test]
fn scheduled_stream_validates_against_its_own_ground_truth() {
    // 6 qubits, compute region holds only 2 at a time: every CX here
    // forces at least one swap before it can execute.
    let insts = vec![
        Instruction::new(InstructionKind::Cx, vec![0, 1]),
        Instruction::new(InstructionKind::Cx, vec![2, 3]),
        Instruction::new(InstructionKind::Cx, vec![4, 5]),
    ];
    let input = encode(6, &insts);

    let mut reader = Cursor::new(input.clone());
    let mut scheduled = Vec::new();
    let mut sched = scheduler_for(2, EmitterKind::Viszlai, 0);
    sched.run(&mut reader, &mut scheduled, u64::MAX).unwrap();

    assert_eq!(sched.stats().inst_done, insts.len() as u64);
    assert!(sched.stats().memory_instructions_added > 0);

    let mut ground_truth = Cursor::new(input);
    let mut test = Cursor::new(scheduled);
    validate_schedule(&mut ground_truth, &mut test, 2).expect("scheduled output must preserve per-qubit op order and residency");
}

#[test]
fn cost_aware_schedule_also_validates() {
    let insts = vec![Instruction::new(InstructionKind::Ccx, vec![0, 1, 2]), Instruction::new(InstructionKind::Cx, vec![3, 4])];
    let input = encode(5, &insts);

    let mut reader = Cursor::new(input.clone());
    let mut scheduled = Vec::new();
    let mut sched = scheduler_for(3, EmitterKind::CostAware, 0);
    sched.run(&mut reader, &mut scheduled, u64::MAX).unwrap();

    let mut ground_truth = Cursor::new(input);
    let mut test = Cursor::new(scheduled);
    validate_schedule(&mut ground_truth, &mut test, 3).expect("cost-aware schedule must validate");
}
