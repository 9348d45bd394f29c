use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::{states_to_string, DebugFlags};
use std::io::Write;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        data: &DefaultProblemData<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", data.n)?;
        writeln!(out, "  unbounded     = {}", data.nub)?;
        writeln!(out, "  upper bounds  = {}", _bool_yes_no(data.is_bounded()))?;
        writeln!(out)?;

        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  pivoting: {}, ratio test: {}, precision: {} bit",
            if settings.block_pivoting {
                "block"
            } else {
                "single"
            },
            settings.ratio_test,
            _get_precision_string::<T>()
        )?;

        let tol_str = if settings.tolerance < T::zero() {
            format!("auto ({:.1e})", self.tolerance)
        } else {
            format!("{:.1e}", self.tolerance)
        };
        writeln!(
            out,
            "  tolerance = {}, iteration limit = {} x n, stall window = {}",
            tol_str, settings.iteration_limit, settings.stall_window
        )?;
        writeln!(
            out,
            "  escalation: {}, perturbation = {:.1e}, warm start: {}",
            _bool_on_off(settings.tolerance_escalation),
            settings.pivot_perturbation,
            _bool_on_off(settings.warm_start)
        )?;
        writeln!(out)?;

        std::io::Result::Ok(())
    }

    pub(crate) fn print_status_header(
        &mut self,
        settings: &DefaultSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;
        writeln!(out, "iter   infeas   basic   pivots")?;
        writeln!(out, "--------------------------------")?;
        out.flush()?;
        std::io::Result::Ok(())
    }

    pub(crate) fn print_status(
        &mut self,
        settings: &DefaultSettings<T>,
        infeasible: usize,
        basic: usize,
        pivots: u32,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;
        writeln!(
            out,
            "{:>4}  {:>7}  {:>6}  {:>7}",
            self.iterations, infeasible, basic, pivots
        )?;
        std::io::Result::Ok(())
    }

    /// Dumps the full variable table when variable tracing is enabled
    pub(crate) fn print_variables(
        &mut self,
        settings: &DefaultSettings<T>,
        vars: &DefaultVariables<T>,
    ) -> std::io::Result<()> {
        if !settings.debug.contains(DebugFlags::VARIABLES) {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;
        writeln!(out, "states: {}", states_to_string(&vars.state))?;
        for (i, ((z, w), s)) in vars.z.iter().zip(&vars.w).zip(&vars.state).enumerate() {
            writeln!(out, "{:>5} {} z = {:+.6e}  w = {:+.6e}", i, s, z, w)?;
        }
        std::io::Result::Ok(())
    }

    pub(crate) fn print_footer(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "--------------------------------")?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "iterations = {}, pivots = {}, failed pivots = {}",
            self.iterations, self.pivots, self.failed_pivots
        )?;
        if self.block_pivoting_disabled {
            writeln!(out, "block pivoting disabled after stalling")?;
        }
        if self.residual.is_finite() {
            writeln!(
                out,
                "residual = {:.3e}, complementarity = {:.3e}, cond(basis) ≈ {:.3e}",
                self.residual, self.complementarity, self.basis_condition
            )?;
        }
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;

        std::io::Result::Ok(())
    }
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _bool_yes_no(v: bool) -> &'static str {
    match v {
        true => "yes",
        false => "no",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}
