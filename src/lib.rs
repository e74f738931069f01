// Core modules
pub mod callwrapper;
pub mod errors;
pub mod logging;
pub mod proptags;

// Re-export commonly used items
pub use callwrapper::CallWrapper;
pub use errors::CallError;
pub use logging::{init_logging, LogConfig, LogFormat, LogOutput};
pub use proptags::{
    change_prop_type, prop_id, prop_tag, prop_type, prop_type_and_id, PropTag,
};

#[cfg(feature = "python")]
use pyo3::exceptions::{PyOverflowError, PyTypeError};
#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::{PyDict, PyTuple};

#[cfg(feature = "python")]
fn ensure_callable(py: Python<'_>, obj: &PyObject) -> PyResult<()> {
    let any = obj.as_ref(py);
    if any.is_callable() {
        Ok(())
    } else {
        Err(PyTypeError::new_err(format!(
            "'{}' object is not callable",
            any.get_type().name()?
        )))
    }
}

/// Wraps a callable with post-processing of its outcome.
///
/// Calling the wrapper forwards all arguments to `func`. A successful return
/// value is passed to `result_handler`, whose result becomes the wrapper's.
/// If `func` raises and an `error_handler` is configured, the handler is
/// called with the exception instance, its return value is discarded, and the
/// original exception is re-raised; without a handler the exception
/// propagates unchanged.
#[cfg(feature = "python")]
#[pyclass(name = "CallWrapper", subclass)]
struct PyCallWrapper {
    func: PyObject,
    result_handler: PyObject,
    error_handler: Option<PyObject>,
}

#[cfg(feature = "python")]
#[pymethods]
impl PyCallWrapper {
    #[new]
    #[pyo3(signature = (func, result_handler, error_handler=None))]
    fn new(
        py: Python<'_>,
        func: PyObject,
        result_handler: PyObject,
        error_handler: Option<PyObject>,
    ) -> PyResult<Self> {
        ensure_callable(py, &func)?;
        ensure_callable(py, &result_handler)?;
        if let Some(handler) = &error_handler {
            ensure_callable(py, handler)?;
        }

        Ok(Self {
            func,
            result_handler,
            error_handler,
        })
    }

    #[pyo3(signature = (*args, **kwargs))]
    fn __call__(
        &self,
        py: Python<'_>,
        args: &PyTuple,
        kwargs: Option<&PyDict>,
    ) -> PyResult<PyObject> {
        match self.func.call(py, args, kwargs) {
            Ok(value) => self.result_handler.call1(py, (value,)),
            Err(err) => {
                let Some(handler) = &self.error_handler else {
                    return Err(err);
                };

                let exc = err.value(py).to_object(py);
                match handler.call1(py, (exc,)) {
                    // Handler output is discarded; the original exception is
                    // re-raised with itself recorded as its cause.
                    Ok(_) => {
                        let cause = err.clone_ref(py);
                        err.set_cause(py, Some(cause));
                        Err(err)
                    }
                    Err(handler_err) => {
                        handler_err.set_cause(py, Some(err));
                        Err(handler_err)
                    }
                }
            }
        }
    }
}

/// Coerce any integer-like object to a tag value with
/// `PyLong_AsUnsignedLongMask` semantics: negative and oversized values wrap,
/// non-integers raise `TypeError`.
#[cfg(feature = "python")]
fn tag_value(obj: &PyAny) -> PyResult<u32> {
    match obj.extract::<i128>() {
        Ok(value) => Ok(value as u32),
        Err(err) if err.is_instance_of::<PyOverflowError>(obj.py()) => {
            obj.call_method1("__and__", (u32::MAX,))?.extract()
        }
        Err(err) => Err(err),
    }
}

/// Returns the property type of a specified property tag.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "PROP_TYPE")]
fn py_prop_type(proptag: &PyAny) -> PyResult<u32> {
    Ok(proptags::prop_type(tag_value(proptag)?))
}

/// Returns the property identifier of a specified property tag.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "PROP_ID")]
fn py_prop_id(proptag: &PyAny) -> PyResult<u32> {
    Ok(proptags::prop_id(tag_value(proptag)?))
}

/// Returns the property type and identifier of a specified property tag.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "PROP_TYPE_AND_ID")]
fn py_prop_type_and_id(proptag: &PyAny) -> PyResult<(u32, u32)> {
    Ok(proptags::prop_type_and_id(tag_value(proptag)?))
}

/// Returns a property tag created by combining a property type and identifier.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "PROP_TAG")]
fn py_prop_tag(proptype: &PyAny, propid: &PyAny) -> PyResult<u32> {
    Ok(proptags::prop_tag(tag_value(proptype)?, tag_value(propid)?))
}

/// Updates the property type of a specified property tag.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "CHANGE_PROP_TYPE")]
fn py_change_prop_type(proptag: &PyAny, proptype: &PyAny) -> PyResult<u32> {
    Ok(proptags::change_prop_type(
        tag_value(proptag)?,
        tag_value(proptype)?,
    ))
}

#[cfg(feature = "python")]
#[pymodule]
fn mapikit(py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyCallWrapper>()?;

    let macros = PyModule::new(py, "macros")?;
    macros.add_function(wrap_pyfunction!(py_prop_type, macros)?)?;
    macros.add_function(wrap_pyfunction!(py_prop_id, macros)?)?;
    macros.add_function(wrap_pyfunction!(py_prop_type_and_id, macros)?)?;
    macros.add_function(wrap_pyfunction!(py_prop_tag, macros)?)?;
    macros.add_function(wrap_pyfunction!(py_change_prop_type, macros)?)?;
    m.add_submodule(macros)?;

    Ok(())
}
